//! Audio sample resources and playback-instance pooling
//!
//! [`AudioSample`] is a low-level resource owning decoded PCM. Playback
//! goes through transient [`SampleInstance`]s: fire-and-forget `play`
//! hands instances to the [`InstancePool`] for eventual reclamation, while
//! `create_instance` yields caller-owned instances. Mixing itself is out of
//! scope; the consuming mixer drives instance progression.

mod instance;
mod pool;
mod sample;

pub use instance::{Ownership, PlayMode, SampleInstance};
pub use pool::{InstanceId, InstancePool};
pub use sample::{AudioSample, SampleData};
