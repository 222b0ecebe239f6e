//! Error types and result aliases for jsr operations.
//!
//! Only transport, decoding and local failures live here. Negative answers
//! from the registry (not found, bad request, unauthorized) are ordinary
//! response variants and never become a `JsrError`.

use thiserror::Error;

/// Unified error type for all jsr operations
#[derive(Error, Debug)]
pub enum JsrError {
    // Config errors
    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Registry errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to decode {operation} response: {message}")]
    Decode {
        operation: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Access token cannot be sent as an HTTP header: {reason}")]
    InvalidToken { reason: String },

    #[error("Invalid package reference '{input}': {reason}")]
    InvalidReference { input: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for jsr operations
pub type JsrResult<T> = Result<T, JsrError>;

impl JsrError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error for the named operation
    pub fn decode<E>(operation: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            operation: operation.to_string(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, JsrError::Network { .. } | JsrError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            JsrError::Network { .. } => Some("Check your internet connection and try again"),
            JsrError::Decode { .. } => {
                Some("The registry answered with an unexpected payload; check --api-url")
            },
            JsrError::InvalidToken { .. } => {
                Some("Copy the access token again from your account settings on jsr.io")
            },
            JsrError::InvalidReference { .. } => Some("Use the form @scope/name, e.g. @std/fmt"),
            JsrError::ConfigParse { .. } | JsrError::ConfigValidation { .. } => {
                Some("Fix jsr.toml or unset the JSR_* environment variables")
            },
            _ => None,
        }
    }
}
