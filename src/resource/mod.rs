//! Native-resource lifecycle capabilities

mod color;

pub use color::{ColorState, Colorable};

/// Capability contract for objects that exclusively own one native handle
/// requiring explicit, ordered release.
///
/// `free` releases the handle and leaves the object in a freed sentinel
/// state. The base contract does not promise idempotence: callers free a
/// resource exactly once, and the owning manager is responsible for making
/// that happen before the underlying subsystem shuts down. No language
/// finalizer runs `free` implicitly; concrete types panic on use after
/// free.
pub trait LowLevelResource {
    /// Releases the underlying native handle.
    ///
    /// # Panics
    ///
    /// Panics if the resource was already freed.
    fn free(&mut self);

    /// Returns true once the handle has been released.
    fn is_freed(&self) -> bool;
}
