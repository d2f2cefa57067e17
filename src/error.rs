//! Error types for the strategy marketplace client.
//!
//! Store actions never fail. These errors only surface from configuration,
//! storage backends, the auth collaborator and command parsing.

use thiserror::Error;

/// The main error type for stratmarket.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, stdin, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Errors reported by the auth collaborator
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new auth error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Channel(_) | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::storage("quota exceeded").to_string(),
            "Storage error: quota exceeded"
        );
        assert_eq!(
            Error::channel("writer stopped").to_string(),
            "Channel error: writer stopped"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::storage("x").is_recoverable());
        assert!(Error::invalid_input("x").is_recoverable());
        assert!(!Error::config("x").is_recoverable());
        assert!(!Error::auth("x").is_recoverable());
    }

    #[test]
    fn test_from_io() {
        let err: Error = std::io::Error::other("disk").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
