//! Health check system for validating framework initialization and status
//!
//! Used to validate startup wiring, CI health, and debugging of
//! initialization issues.
//!
//! # Example
//!
//! ```no_run
//! use tidepool::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(DispatchCheck::new())
//!     .add_check(TriggerCheck::new())
//!     .add_check(BuildInfoCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::DispatchCheck::new())
        .add_check(checks::TriggerCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .run()
}
