//! Built-in health checks for core systems

pub mod build_info;
pub mod config;
pub mod dispatch;
pub mod triggers;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use dispatch::DispatchCheck;
pub use triggers::TriggerCheck;
