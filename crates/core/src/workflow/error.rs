//! Workflow error types for request review.

use parkpro_shared::{AppError, Role};
use thiserror::Error;

use crate::workflow::types::{RequestStatus, ReviewKind};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The requested status is unknown or not a decision for this kind.
    #[error("Invalid status")]
    InvalidStatus,

    /// A government decision came with fewer than `MIN_REASON_CHARS`
    /// characters of reason.
    #[error("Reason must be at least 10 characters")]
    ReasonTooShort,

    /// The caller's role does not decide this kind of request.
    #[error("{role} may not review {kind} records")]
    NotReviewer {
        /// The kind under review.
        kind: ReviewKind,
        /// The caller's role.
        role: Role,
    },

    /// The request was already decided; decisions are terminal.
    #[error("{kind} has already been {status}")]
    AlreadyDecided {
        /// The kind under review.
        kind: ReviewKind,
        /// Its recorded status.
        status: RequestStatus,
    },

    /// The request can no longer be edited or withdrawn.
    #[error("{kind} can only be changed while pending (currently {status})")]
    NotEditable {
        /// The kind of request.
        kind: ReviewKind,
        /// Its recorded status.
        status: RequestStatus,
    },
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidStatus | WorkflowError::ReasonTooShort => {
                Self::Validation(err.to_string())
            }
            WorkflowError::NotReviewer { .. } => Self::Forbidden(err.to_string()),
            WorkflowError::AlreadyDecided { .. } | WorkflowError::NotEditable { .. } => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
