//! HTTP mapping of application errors.
//!
//! Every handler returns `Result<_, ApiError>`. The body is always
//! `{"error": "<message>"}`, plus `missing` for absent fields. Dependency
//! failures are logged in full and answered with a generic message.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use tracing::error;

use parkpro_core::auth::AuthError;
use parkpro_core::intake::IntakeError;
use parkpro_core::workflow::WorkflowError;
use parkpro_db::{FundRequestError, ReviewError};
use parkpro_shared::{AppError, JwtError};

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 401 with the given message.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with the given message.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 404 with the given message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 409 with the given message.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self(AppError::Conflict(message.into()))
    }

    /// 400 with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_server_error() {
            error!(code = err.error_code(), error = %err, "Request failed");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match &err {
            AppError::MissingFields(missing) => {
                json!({ "error": err.public_message(), "missing": missing })
            }
            _ => json!({ "error": err.public_message() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        Self(err.into())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        Self(err.into())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Encoding(msg) => Self(AppError::Internal(msg)),
            other => Self::unauthorized(other.to_string()),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::conflict("Email already exists"),
            _ => Self(AppError::Database(err.to_string())),
        }
    }
}

impl From<FundRequestError> for ApiError {
    fn from(err: FundRequestError) -> Self {
        match err {
            FundRequestError::NotFound => Self::not_found(err.to_string()),
            FundRequestError::Workflow(e) => e.into(),
            FundRequestError::Database(e) => e.into(),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(_) => Self::not_found(err.to_string()),
            ReviewError::Workflow(e) => e.into(),
            ReviewError::Database(e) => e.into(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::validation(err.body_text())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self(AppError::Internal(format!("upload storage: {err}")))
    }
}
