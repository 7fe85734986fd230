//! Intake validation errors.

use parkpro_shared::AppError;
use thiserror::Error;

/// Errors raised while validating submitted forms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// One or more required fields were absent or blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// An amount was zero or negative.
    #[error("{0} amount must be positive")]
    NonPositiveAmount(&'static str),

    /// Tour party size outside 1..=20.
    #[error("Guests must be between 1 and 20")]
    GuestsOutOfRange,

    /// Tour amount does not equal the per-guest price times the guests.
    #[error("Invalid amount: must be $75 per guest")]
    TourAmountMismatch,

    /// Tour date or time not in `YYYY-MM-DD` / `HH:MM` form.
    #[error("Invalid date or time format")]
    InvalidDateTime,

    /// Service application without its registration document.
    #[error("Company registration file is required")]
    MissingRegistration,

    /// Budget submitted without line items.
    #[error("Budget must contain at least one item")]
    EmptyBudget,

    /// New password and its confirmation differ.
    #[error("New passwords don't match")]
    PasswordMismatch,
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::MissingFields(fields) => Self::MissingFields(fields),
            other => Self::Validation(other.to_string()),
        }
    }
}
