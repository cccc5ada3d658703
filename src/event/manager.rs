//! Event manager: queue ownership, handler registry, per-tick dispatch

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use super::event::{EventKind, SourceId, SourceKind};
use super::handler::LowLevelEventHandler;
use super::queue::EventQueue;

/// Registration identity of a handler within the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct HandlerEntry {
    id: HandlerId,
    handler: Weak<RefCell<dyn LowLevelEventHandler>>,
}

enum PendingOp {
    Add(HandlerEntry),
    Remove(HandlerId),
}

struct ManagerInner {
    /// `None` after `finalize`; every other operation panics from then on.
    queue: Option<EventQueue>,
    /// Registration order is dispatch order.
    handlers: Vec<HandlerEntry>,
    /// Handler-set mutations requested during a dispatch pass, applied at
    /// the end of the pass.
    pending: Vec<PendingOp>,
    dispatching: bool,
    next_handler: u64,
}

impl ManagerInner {
    fn queue_mut(&mut self) -> &mut EventQueue {
        self.queue
            .as_mut()
            .expect("event manager used after finalize")
    }

    fn is_known_handler(&self, id: HandlerId) -> bool {
        self.handlers.iter().any(|e| e.id == id)
            || self.pending.iter().any(|op| match op {
                PendingOp::Add(e) => e.id == id,
                PendingOp::Remove(_) => false,
            })
    }

    fn add_handler(&mut self, handler: Rc<RefCell<dyn LowLevelEventHandler>>) -> HandlerId {
        assert!(
            self.queue.is_some(),
            "event manager used after finalize"
        );
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        let entry = HandlerEntry {
            id,
            handler: Rc::downgrade(&handler),
        };
        if self.dispatching {
            // Deferred: the new handler does not see events from the tick
            // in which it registered.
            self.pending.push(PendingOp::Add(entry));
        } else {
            self.handlers.push(entry);
        }
        id
    }

    fn remove_handler(&mut self, id: HandlerId) {
        assert!(
            self.queue.is_some(),
            "event manager used after finalize"
        );
        assert!(
            self.is_known_handler(id),
            "handler {:?} is not registered",
            id
        );
        if self.dispatching {
            self.pending.push(PendingOp::Remove(id));
        } else {
            self.handlers.retain(|e| e.id != id);
        }
    }

    /// Best-effort removal used by RAII guards: never panics, even after
    /// finalize or when the id was already removed.
    fn detach_handler(&mut self, id: HandlerId) {
        if self.queue.is_none() {
            return;
        }
        if self.dispatching {
            self.pending.push(PendingOp::Remove(id));
        } else {
            self.handlers.retain(|e| e.id != id);
        }
    }

    fn apply_pending(&mut self) {
        for op in self.pending.drain(..) {
            match op {
                PendingOp::Add(entry) => self.handlers.push(entry),
                PendingOp::Remove(id) => self.handlers.retain(|e| e.id != id),
            }
        }
    }
}

/// Sole owner of the event queue and the registered-handler set.
///
/// Constructed once at startup, driven once per frame via
/// [`dispatch_tick`](Self::dispatch_tick), and explicitly torn down with
/// [`finalize`](Self::finalize) before the surrounding subsystem shuts down.
/// An explicit manager instance is passed through the application instead of
/// hidden global state, which keeps lifetime and test isolation explicit.
///
/// The manager is single-threaded by construction (`Rc` interior); the queue
/// is only ever drained from the thread driving ticks.
pub struct EventManager {
    inner: Rc<RefCell<ManagerInner>>,
}

impl EventManager {
    /// Creates the queue and registers the three hardware sources plus the
    /// built-in software source for tick/custom events.
    pub fn new() -> Self {
        let mut queue = EventQueue::new();
        queue.register(SourceId::POINTER, SourceKind::Pointer);
        queue.register(SourceId::KEYBOARD, SourceKind::Keyboard);
        queue.register(SourceId::JOYSTICK, SourceKind::Joystick);
        queue.register(SourceId::SOFTWARE, SourceKind::Software);
        info!(sources = queue.source_count(), "event manager initialized");

        Self {
            inner: Rc::new(RefCell::new(ManagerInner {
                queue: Some(queue),
                handlers: Vec::new(),
                pending: Vec::new(),
                dispatching: false,
                next_handler: 0,
            })),
        }
    }

    /// Returns a cloneable handle for registering sources and handlers.
    ///
    /// Handlers hold one of these to mutate the handler set or push events
    /// from inside callbacks; such mutations are deferred until the current
    /// dispatch pass completes.
    pub fn context(&self) -> EventContext {
        EventContext {
            inner: self.inner.clone(),
        }
    }

    /// Registers an additional source into the queue.
    ///
    /// # Panics
    ///
    /// Panics if the source is already registered or the manager was
    /// finalized.
    pub fn register_source(&self, id: SourceId, kind: SourceKind) {
        self.inner.borrow_mut().queue_mut().register(id, kind);
    }

    /// Unregisters a source from the queue.
    ///
    /// # Panics
    ///
    /// Panics if the source is not registered or the manager was finalized.
    pub fn unregister_source(&self, id: SourceId) {
        self.inner.borrow_mut().queue_mut().unregister(id);
    }

    /// Adds a handler to the end of the dispatch order, returning its
    /// registration identity.
    ///
    /// The manager keeps a non-owning reference: once the last external
    /// `Rc` to the handler is dropped, the handler receives no further
    /// callbacks and is pruned at the next tick.
    pub fn add_handler(&self, handler: Rc<RefCell<dyn LowLevelEventHandler>>) -> HandlerId {
        self.inner.borrow_mut().add_handler(handler)
    }

    /// Removes a handler from dispatch.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    pub fn remove_handler(&self, id: HandlerId) {
        self.inner.borrow_mut().remove_handler(id);
    }

    /// Pushes an event from a registered source.
    pub fn push_event(&self, source: SourceId, kind: EventKind) {
        self.inner.borrow_mut().queue_mut().push(source, kind);
    }

    /// Pushes an application-defined payload on the software source.
    pub fn push_custom(&self, payload: u64) {
        self.push_event(SourceId::SOFTWARE, EventKind::Custom { payload });
    }

    /// Number of live registered handlers.
    pub fn handler_count(&self) -> usize {
        self.inner
            .borrow()
            .handlers
            .iter()
            .filter(|e| e.handler.strong_count() > 0)
            .count()
    }

    /// Number of events currently queued.
    pub fn queued_events(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.queue_mut().len()
    }

    /// Runs one dispatch pass.
    ///
    /// 1. `begin_tick` on every registered handler, in registration order.
    /// 2. A tick event carrying `dt` is pushed on the software source, then
    ///    everything queued at that point is drained one event at a time;
    ///    each event is delivered to every handler in registration order
    ///    before the next event is popped.
    /// 3. `end_tick` on every handler, in registration order.
    ///
    /// Handler-set mutations requested from inside callbacks are applied
    /// after step 3. Events pushed from inside callbacks are delivered next
    /// tick.
    ///
    /// # Panics
    ///
    /// Panics if called after [`finalize`](Self::finalize) or re-entered
    /// from inside a callback.
    pub fn dispatch_tick(&mut self, dt: f64) {
        let pass: Vec<Rc<RefCell<dyn LowLevelEventHandler>>> = {
            let mut inner = self.inner.borrow_mut();
            assert!(
                inner.queue.is_some(),
                "event manager used after finalize"
            );
            assert!(!inner.dispatching, "dispatch_tick re-entered");
            // Handlers whose owner dropped since last tick get no callbacks.
            inner.handlers.retain(|e| e.handler.strong_count() > 0);
            inner.dispatching = true;
            inner
                .handlers
                .iter()
                .filter_map(|e| e.handler.upgrade())
                .collect()
        };

        for handler in &pass {
            handler.borrow_mut().begin_tick();
        }

        // Snapshot the drain length after queuing the tick event: events
        // pushed during callbacks belong to the next tick.
        let drain = {
            let mut inner = self.inner.borrow_mut();
            let queue = inner.queue_mut();
            queue.push(SourceId::SOFTWARE, EventKind::Tick { dt });
            queue.len()
        };

        for _ in 0..drain {
            let event = self.inner.borrow_mut().queue_mut().pop();
            let Some(event) = event else { break };
            for handler in &pass {
                handler.borrow_mut().handle_event(&event);
            }
        }

        for handler in &pass {
            handler.borrow_mut().end_tick();
        }

        let mut inner = self.inner.borrow_mut();
        inner.dispatching = false;
        inner.apply_pending();
    }

    /// Unregisters the built-in sources and destroys the queue.
    ///
    /// Must run before the surrounding subsystem shuts down. Any manager
    /// operation afterwards panics.
    ///
    /// # Panics
    ///
    /// Panics if called twice or during a dispatch pass.
    pub fn finalize(&mut self) {
        let mut inner = self.inner.borrow_mut();
        assert!(!inner.dispatching, "finalize called during dispatch");
        let mut queue = inner
            .queue
            .take()
            .expect("event manager finalized twice");
        debug!(dropped = queue.len(), "draining event queue at finalize");
        queue.unregister(SourceId::SOFTWARE);
        queue.unregister(SourceId::JOYSTICK);
        queue.unregister(SourceId::KEYBOARD);
        queue.unregister(SourceId::POINTER);
        inner.handlers.clear();
        inner.pending.clear();
        info!("event manager finalized");
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle onto the manager's registries.
///
/// Held by handlers, device collectors, and any subsystem that needs to
/// register sources or push events. All operations share the manager's
/// deferred-mutation policy during dispatch.
#[derive(Clone)]
pub struct EventContext {
    inner: Rc<RefCell<ManagerInner>>,
}

impl EventContext {
    /// See [`EventManager::add_handler`].
    pub fn add_handler(&self, handler: Rc<RefCell<dyn LowLevelEventHandler>>) -> HandlerId {
        self.inner.borrow_mut().add_handler(handler)
    }

    /// See [`EventManager::remove_handler`].
    pub fn remove_handler(&self, id: HandlerId) {
        self.inner.borrow_mut().remove_handler(id);
    }

    /// Best-effort removal that never panics; used by drop guards.
    pub(crate) fn detach_handler(&self, id: HandlerId) {
        self.inner.borrow_mut().detach_handler(id);
    }

    /// See [`EventManager::register_source`].
    pub fn register_source(&self, id: SourceId, kind: SourceKind) {
        self.inner.borrow_mut().queue_mut().register(id, kind);
    }

    /// See [`EventManager::unregister_source`].
    pub fn unregister_source(&self, id: SourceId) {
        self.inner.borrow_mut().queue_mut().unregister(id);
    }

    /// See [`EventManager::push_event`].
    pub fn push_event(&self, source: SourceId, kind: EventKind) {
        self.inner.borrow_mut().queue_mut().push(source, kind);
    }

    /// See [`EventManager::push_custom`].
    pub fn push_custom(&self, payload: u64) {
        self.push_event(SourceId::SOFTWARE, EventKind::Custom { payload });
    }
}
