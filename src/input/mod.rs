//! Input triggers: raw events in, semantic signals out
//!
//! A [`TriggerSet`] registers as a low-level event handler and evaluates
//! every drained event against its bindings; the application consumes
//! [`TriggerSignal`]s after each `dispatch_tick`. Trigger configurations
//! save and restore through [`TriggerMemento`]s for user-rebindable
//! controls.

mod dispatcher;
mod param;
mod trigger;
mod variants;

pub use dispatcher::{TriggerSet, TriggerSignal};
pub use param::InputParam;
pub use trigger::{InputTrigger, TriggerMemento};
pub use variants::{
    AxisThresholdTrigger, KeyPressTrigger, NullTrigger, PointerButtonTrigger,
    trigger_from_memento,
};
