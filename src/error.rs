//! Error types for muser
//!
//! This module defines the error types used throughout the application.
//! We use `thiserror` for ergonomic error definitions and `anyhow` for
//! error propagation in the binary.
//!
//! Note that playback queries never produce these errors: failures of
//! individual `playerctl` invocations are absorbed by the player backend
//! and surface as default values instead.

use thiserror::Error;

/// Main error type for muser operations
#[derive(Error, Debug)]
pub enum MuserError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The media-control utility could not be found or started
    #[error("Player backend unavailable: {0}")]
    PlayerUnavailable(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// Launcher errors (log file, detached spawn)
    #[error("Launch error: {0}")]
    Launch(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using MuserError
pub type Result<T> = std::result::Result<T, MuserError>;

impl From<toml::de::Error> for MuserError {
    fn from(err: toml::de::Error) -> Self {
        MuserError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MuserError::PlayerUnavailable("playerctl not found".to_string());
        assert_eq!(
            err.to_string(),
            "Player backend unavailable: playerctl not found"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: MuserError = toml_err.into();
        assert!(matches!(err, MuserError::Config(_)));
    }
}
