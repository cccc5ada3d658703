//! Tidepool
//!
//! A small real-time application framework: one event queue, per-tick
//! dispatch to low-level handlers, input triggers with serializable
//! bindings, and explicit native-resource lifecycle management.

/// Audio sample resources and playback-instance pooling
pub mod audio;

/// Build-time information (timestamp, target, compiler version)
pub mod build_info;

/// Profile-based configuration loading
pub mod config;

/// Device boundary - raw backend events into the queue
pub mod device;

/// Error types
pub mod error;

/// Event queue, manager, and low-level handler dispatch
pub mod event;

/// Health check system
pub mod health;

/// Input triggers - raw events to semantic signals
pub mod input;

/// Native-resource lifecycle capabilities
pub mod resource;

pub use error::Error;
