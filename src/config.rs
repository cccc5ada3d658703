//! Framework configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tidepool".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Optional JSON file of trigger bindings to restore at startup
    pub bindings: Option<PathBuf>,
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Maximum number of simultaneously live fire-and-forget instances
    pub pool_capacity: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { pool_capacity: 64 }
    }
}

/// Framework configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Input configuration
    pub input: InputConfig,
    /// Audio configuration
    pub audio: AudioConfig,
}

impl FrameworkConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{profile}.toml (profile-specific overrides)
    /// 3. Environment variables with prefix TIDEPOOL_
    ///    (e.g., TIDEPOOL_WINDOW__WIDTH=1920)
    pub fn load(profile: &str) -> Result<Self, Error> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Use __ as separator for nested fields (e.g., TIDEPOOL_AUDIO__POOL_CAPACITY)
            .add_source(
                Environment::with_prefix("TIDEPOOL")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)
            .map_err(Error::from)?
            .build()
            .map_err(Error::from)?;

        config.try_deserialize().map_err(Error::from)
    }

    /// Loads configuration using the TIDEPOOL_PROFILE environment variable,
    /// defaulting to "debug" if not set
    pub fn load_from_env() -> Result<Self, Error> {
        let profile = std::env::var("TIDEPOOL_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = FrameworkConfig::default();
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.audio.pool_capacity, 64);
        assert!(config.input.bindings.is_none());
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = FrameworkConfig::load("nonexistent-profile").unwrap();
        assert_eq!(config.profile, "nonexistent-profile");
        assert_eq!(config.window.height, 600.0);
    }
}
