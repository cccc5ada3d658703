//! Event dispatch core
//!
//! One queue, one ordered handler set, one dispatch pass per frame:
//!
//! ```text
//! device sources ─┐
//! software source ─┤→ EventQueue → dispatch_tick → LowLevelEventHandlers
//!                  │                (begin_tick / handle_event / end_tick)
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use tidepool::event::{Event, EventManager, LowLevelEventHandler, RegisteredHandler};
//!
//! struct Echo;
//! impl LowLevelEventHandler for Echo {
//!     fn handle_event(&mut self, event: &Event) {
//!         println!("{:?}", event.kind);
//!     }
//! }
//!
//! let mut manager = EventManager::new();
//! let ctx = manager.context();
//! let _echo = RegisteredHandler::new(&ctx, Echo);
//!
//! // Once per frame:
//! manager.dispatch_tick(1.0 / 60.0);
//!
//! // Before subsystem shutdown:
//! manager.finalize();
//! ```

#[allow(clippy::module_inception)]
mod event;
mod handler;
mod manager;
mod queue;

pub use event::{Event, EventKind, Key, PointerButton, SourceId, SourceKind};
pub use handler::{LowLevelEventHandler, RegisteredHandler};
pub use manager::{EventContext, EventManager, HandlerId};
pub use queue::EventQueue;
