use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No store was found by token: \"{token}\"")]
    InvalidCredential { token: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Credential,
    Configuration,
    Internal,
}

impl CheckoutError {
    pub fn invalid_credential(token: impl Into<String>) -> Self {
        CheckoutError::InvalidCredential {
            token: token.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckoutError::Database(_) => ErrorCategory::Storage,
            CheckoutError::InvalidCredential { .. } => ErrorCategory::Credential,
            CheckoutError::ConfigError { .. }
            | CheckoutError::ConfigValidationError { .. }
            | CheckoutError::InvalidConfigValueError { .. }
            | CheckoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CheckoutError::Io(_) | CheckoutError::Serialization(_) => ErrorCategory::Internal,
        }
    }

    /// Status the checkout endpoint reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::InvalidCredential { .. } => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
