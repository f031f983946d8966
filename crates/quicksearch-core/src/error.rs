//! Error types for quick search.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory.
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Failed to read {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// TOML that doesn't match [`crate::AppConfig`].
    #[error("Invalid config: {0}")]
    Parse(String),

    /// The spotlight chord could not be parsed.
    #[error("Invalid hotkey: {0}")]
    InvalidHotkey(String),
}
