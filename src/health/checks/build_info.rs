//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build metadata was captured at compile time
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata embedded by the build script")
    }

    fn check(&self) -> CheckResult {
        let fields = [
            ("timestamp", build_info::BUILD_TIMESTAMP),
            ("target", build_info::CARGO_TARGET_TRIPLE),
            ("opt level", build_info::CARGO_OPT_LEVEL),
            ("rustc", build_info::RUSTC_SEMVER),
        ];

        for (label, value) in fields {
            if value.is_empty() {
                return CheckResult::fail(format!("build {} missing", label));
            }
        }

        CheckResult::pass(build_info::version_string()).with_details(build_info::detailed_info())
    }
}
