// src/error.rs

//! Unified error handling for the booking application.

use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login attempt answered with an unexpected status
    #[error("Login rejected with status {status}: {body}")]
    LoginRejected { status: u16, body: String },

    /// Login failed after exhausting all attempts
    #[error("Authentication failed after {attempts} attempts: {message}")]
    Auth { attempts: u32, message: String },

    /// Order submission failed for a single target
    #[error("Order error for {target}: {message}")]
    Order { target: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an order error with target context.
    pub fn order(target: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Order {
            target: target.into(),
            message: message.to_string(),
        }
    }
}
