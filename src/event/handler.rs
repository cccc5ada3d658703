//! Low-level event handler trait and lifetime-scoped registration

use std::cell::RefCell;
use std::rc::Rc;

use super::event::Event;
use super::manager::{EventContext, HandlerId};

/// A registered, ordered participant in per-tick dispatch.
///
/// Handlers receive every event drained during a tick, bracketed by
/// [`begin_tick`](Self::begin_tick) and [`end_tick`](Self::end_tick). For a
/// given event, handlers are invoked in stable registration order.
pub trait LowLevelEventHandler {
    /// Receives one raw event.
    fn handle_event(&mut self, event: &Event);

    /// Called once at the start of every dispatch pass.
    fn begin_tick(&mut self) {
        // Default: no-op
    }

    /// Called once at the end of every dispatch pass.
    fn end_tick(&mut self) {
        // Default: no-op
    }
}

/// Owns a handler together with its registration, tying registration to the
/// handler's lifetime.
///
/// Constructing a `RegisteredHandler` adds the handler to the manager's set;
/// dropping it removes the handler. While the guard lives, the handler is
/// registered; there is no window where it exists but is unregistered
/// (beyond the end-of-tick mutation deferral documented on
/// [`EventManager`](super::EventManager)).
pub struct RegisteredHandler<H: LowLevelEventHandler + 'static> {
    handler: Rc<RefCell<H>>,
    ctx: EventContext,
    id: HandlerId,
}

impl<H: LowLevelEventHandler + 'static> RegisteredHandler<H> {
    /// Wraps `handler` and registers it with the manager behind `ctx`.
    pub fn new(ctx: &EventContext, handler: H) -> Self {
        let handler = Rc::new(RefCell::new(handler));
        let id = ctx.add_handler(handler.clone() as Rc<RefCell<dyn LowLevelEventHandler>>);
        Self {
            handler,
            ctx: ctx.clone(),
            id,
        }
    }

    /// Registration identity within the manager.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Shared access to the wrapped handler.
    ///
    /// Do not hold the returned borrow across `dispatch_tick`; the manager
    /// borrows the handler mutably to deliver callbacks.
    pub fn handle(&self) -> &Rc<RefCell<H>> {
        &self.handler
    }

    /// Borrows the wrapped handler immutably.
    pub fn borrow(&self) -> std::cell::Ref<'_, H> {
        self.handler.borrow()
    }

    /// Borrows the wrapped handler mutably.
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, H> {
        self.handler.borrow_mut()
    }
}

impl<H: LowLevelEventHandler + 'static> Drop for RegisteredHandler<H> {
    fn drop(&mut self) {
        // Forgiving removal: a guard outliving the manager's finalize must
        // not panic on the way out.
        self.ctx.detach_handler(self.id);
    }
}
