//! Workflow service for request review transitions.
//!
//! Decisions are validated here and persisted by the caller with a single
//! conditional update on `status = 'pending'`, so two racing reviewers
//! cannot both succeed. When that update touches no row the caller reads
//! the current status back and asks [`WorkflowService::check_transition`]
//! for the precise error.

use chrono::Utc;
use parkpro_shared::Role;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{MIN_REASON_CHARS, RequestStatus, ReviewDecision, ReviewKind};

/// Stateless service for request review transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Validates a reviewer's decision.
    ///
    /// # Arguments
    /// * `kind` - The kind of request under review
    /// * `role` - The caller's role
    /// * `reviewer_id` - The caller's id within its role table
    /// * `requested` - The raw status from the request body
    /// * `reason` - The justification, if any
    ///
    /// # Errors
    /// * `WorkflowError::NotReviewer` if `role` does not decide `kind`
    /// * `WorkflowError::InvalidStatus` if `requested` is not an allowed
    ///   decision for `kind`
    /// * `WorkflowError::ReasonTooShort` if a reason is required and
    ///   shorter than `MIN_REASON_CHARS` once trimmed
    pub fn review(
        kind: ReviewKind,
        role: Role,
        reviewer_id: i32,
        requested: Option<&str>,
        reason: Option<&str>,
    ) -> Result<ReviewDecision, WorkflowError> {
        if role != kind.reviewer() {
            return Err(WorkflowError::NotReviewer { kind, role });
        }

        let new_status = requested
            .and_then(RequestStatus::parse)
            .filter(|status| kind.allowed_decisions().contains(status))
            .ok_or(WorkflowError::InvalidStatus)?;

        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if kind.requires_reason() && reason.is_none_or(|r| r.chars().count() < MIN_REASON_CHARS) {
            return Err(WorkflowError::ReasonTooShort);
        }

        Ok(ReviewDecision {
            kind,
            new_status,
            reviewed_by: reviewer_id,
            reviewed_at: Utc::now(),
            reason: reason.map(String::from),
        })
    }

    /// Checks that a request in `current` may move to `target`.
    ///
    /// # Errors
    /// Returns `WorkflowError::AlreadyDecided` unless `current` is pending,
    /// and `WorkflowError::InvalidStatus` if `target` is not a decision for
    /// `kind`.
    pub fn check_transition(
        kind: ReviewKind,
        current: RequestStatus,
        target: RequestStatus,
    ) -> Result<(), WorkflowError> {
        if current.is_decided() {
            return Err(WorkflowError::AlreadyDecided {
                kind,
                status: current,
            });
        }
        if !kind.allowed_decisions().contains(&target) {
            return Err(WorkflowError::InvalidStatus);
        }
        Ok(())
    }

    /// Checks that a request may still be edited or withdrawn by its
    /// creator.
    ///
    /// # Errors
    /// Returns `WorkflowError::NotEditable` once the request is decided.
    pub fn ensure_editable(kind: ReviewKind, current: RequestStatus) -> Result<(), WorkflowError> {
        if current.is_decided() {
            return Err(WorkflowError::NotEditable {
                kind,
                status: current,
            });
        }
        Ok(())
    }
}
