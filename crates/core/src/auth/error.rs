//! Login error types.

use parkpro_shared::{AppError, JwtError};
use thiserror::Error;

use super::store::StoreError;

/// Errors that end a login attempt.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password absent or blank.
    #[error("Email and password are required")]
    MissingCredentials,

    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The principal lookup itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The session token could not be signed.
    #[error("failed to issue session token: {0}")]
    Token(#[from] JwtError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => Self::Validation(err.to_string()),
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::Store(e) => Self::Database(e.0),
            AuthError::Token(e) => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_boundary_errors() {
        let err: AppError = AuthError::MissingCredentials.into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Email and password are required");

        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.public_message(), "Invalid credentials");

        let err: AppError = AuthError::Store(StoreError("pool timed out".into())).into();
        assert_eq!(err.status_code(), 500);
        assert!(!err.public_message().contains("pool"));
    }
}
