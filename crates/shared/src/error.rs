//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more required fields were absent.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Bad credentials or a missing, expired or invalid token.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role may not perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Referenced row is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate entry or a state that no longer allows the operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database unreachable or a query failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::MissingFields(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for logs and metrics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::MissingFields(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message a client may see.
    ///
    /// Dependency failures are redacted; their detail only goes to logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::MissingFields(_) => "Missing required fields".to_string(),
            Self::Database(_) => "Database operation failed".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns true for failures caused by a dependency rather than the
    /// caller.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
