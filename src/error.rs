//! Error handling module for storagewiz
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Field-level form errors are not represented here: they live in
//! [`crate::providers::FieldErrors`] and are rendered inline.

use thiserror::Error;

/// Main error type for storagewiz
#[derive(Error, Debug)]
pub enum WizardError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog or settings misconfiguration (reserved field names, bad region lists)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors surfaced outside the form (headless mode)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote validation did not answer before its deadline
    #[error("Remote validation timed out after {0} ms")]
    RemoteTimeout(u64),

    /// Remote validation worker went away without answering
    #[error("Remote validation failed: {0}")]
    Remote(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for storagewiz operations
pub type Result<T> = std::result::Result<T, WizardError>;

impl WizardError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a remote validation error
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WizardError::config("provider field declared twice");
        assert_eq!(
            err.to_string(),
            "Configuration error: provider field declared twice"
        );

        let err = WizardError::RemoteTimeout(5000);
        assert_eq!(err.to_string(), "Remote validation timed out after 5000 ms");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WizardError = io_err.into();
        assert!(matches!(err, WizardError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(WizardError::remote("gone"), WizardError::Remote(_)));
        assert!(matches!(
            WizardError::terminal("no tty"),
            WizardError::Terminal(_)
        ));
        assert!(matches!(
            WizardError::validation("bad"),
            WizardError::Validation(_)
        ));
    }
}
