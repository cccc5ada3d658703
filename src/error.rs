//! Error types for the framework core

use std::path::PathBuf;

/// Errors surfaced to callers of the framework core.
///
/// Recoverable data errors (bad files, bad bindings) come back through this
/// enum. Lifecycle misuse (double source registration, use after `free()`,
/// use after `finalize()`) is a bug in the caller and panics instead of
/// returning a variant here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An audio file could not be opened.
    #[error("failed to open audio sample '{path}': {source}")]
    AudioLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An audio file was opened but could not be decoded.
    #[error("failed to decode audio sample: {0}")]
    AudioDecode(#[from] rodio::decoder::DecoderError),

    /// The fire-and-forget instance pool is at capacity even after reclaim.
    #[error("audio instance pool exhausted ({capacity} instances)")]
    PoolExhausted { capacity: usize },

    /// A trigger memento did not match the trigger it was restored into.
    #[error("trigger memento mismatch: {0}")]
    Memento(String),

    /// A bindings file could not be read or parsed.
    #[error("failed to load input bindings from '{path}': {message}")]
    Bindings { path: PathBuf, message: String },

    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Creates a memento-mismatch error from a message.
    pub(crate) fn memento(msg: impl Into<String>) -> Self {
        Self::Memento(msg.into())
    }
}
