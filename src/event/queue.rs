//! The single event queue and its source registry

use std::collections::VecDeque;
use std::time::Instant;

use tracing::debug;

use super::event::{Event, EventKind, SourceId, SourceKind};

/// A registered event source.
#[derive(Debug, Clone, Copy)]
struct RegisteredSource {
    id: SourceId,
    kind: SourceKind,
}

/// The single FIFO aggregating events from every registered source.
///
/// Exactly one queue exists per [`EventManager`](super::EventManager). All
/// pushes and pops happen on the one thread driving ticks; the queue is
/// deliberately not `Send`-shared anywhere in this crate.
///
/// Registration misuse (double registration, unregistering an unknown
/// source, pushing from an unregistered source) is a programming error and
/// panics immediately rather than being silently tolerated.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<Event>,
    sources: Vec<RegisteredSource>,
    epoch: Instant,
}

impl EventQueue {
    /// Creates an empty queue with no registered sources.
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            sources: Vec::new(),
            epoch: Instant::now(),
        }
    }

    /// Registers a source into the queue.
    ///
    /// # Panics
    ///
    /// Panics if the source is already registered.
    pub fn register(&mut self, id: SourceId, kind: SourceKind) {
        assert!(
            !self.is_registered(id),
            "event source {:?} ({:?}) is already registered",
            id,
            kind
        );
        debug!(?id, ?kind, "registering event source");
        self.sources.push(RegisteredSource { id, kind });
    }

    /// Unregisters a source. Events it already queued stay queued.
    ///
    /// # Panics
    ///
    /// Panics if the source is not registered.
    pub fn unregister(&mut self, id: SourceId) {
        let pos = self
            .sources
            .iter()
            .position(|s| s.id == id)
            .unwrap_or_else(|| panic!("event source {:?} is not registered", id));
        let removed = self.sources.swap_remove(pos);
        debug!(?id, kind = ?removed.kind, "unregistered event source");
    }

    /// Returns true if the source is currently registered.
    pub fn is_registered(&self, id: SourceId) -> bool {
        self.sources.iter().any(|s| s.id == id)
    }

    /// Number of currently registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Queues an event from a registered source, stamping it with the time
    /// since queue creation.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not registered.
    pub fn push(&mut self, source: SourceId, kind: EventKind) {
        assert!(
            self.is_registered(source),
            "cannot push event from unregistered source {:?}",
            source
        );
        self.events.push_back(Event {
            source,
            timestamp: self.epoch.elapsed().as_secs_f64(),
            kind,
        });
    }

    /// Removes and returns the oldest queued event, if any. Never blocks.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Number of currently queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::event::Key;

    #[test]
    fn test_events_pop_in_arrival_order() {
        let mut queue = EventQueue::new();
        queue.register(SourceId::KEYBOARD, SourceKind::Keyboard);
        queue.push(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::A });
        queue.push(SourceId::KEYBOARD, EventKind::KeyUp { key: Key::A });

        assert_eq!(queue.len(), 2);
        let first = queue.pop().unwrap();
        assert_eq!(first.kind, EventKind::KeyDown { key: Key::A });
        let second = queue.pop().unwrap();
        assert_eq!(second.kind, EventKind::KeyUp { key: Key::A });
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_timestamps_are_monotonic() {
        let mut queue = EventQueue::new();
        queue.register(SourceId::SOFTWARE, SourceKind::Software);
        queue.push(SourceId::SOFTWARE, EventKind::Custom { payload: 1 });
        queue.push(SourceId::SOFTWARE, EventKind::Custom { payload: 2 });

        let a = queue.pop().unwrap();
        let b = queue.pop().unwrap();
        assert!(b.timestamp >= a.timestamp);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_double_registration_panics() {
        let mut queue = EventQueue::new();
        queue.register(SourceId::POINTER, SourceKind::Pointer);
        queue.register(SourceId::POINTER, SourceKind::Pointer);
    }

    #[test]
    #[should_panic(expected = "is not registered")]
    fn test_unregister_unknown_source_panics() {
        let mut queue = EventQueue::new();
        queue.unregister(SourceId::JOYSTICK);
    }

    #[test]
    #[should_panic(expected = "unregistered source")]
    fn test_push_from_unregistered_source_panics() {
        let mut queue = EventQueue::new();
        queue.push(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::A });
    }
}
