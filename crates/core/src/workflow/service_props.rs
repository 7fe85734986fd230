//! Property-based tests for WorkflowService.

use parkpro_shared::Role;
use proptest::prelude::*;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{MIN_REASON_CHARS, RequestStatus, ReviewKind};

/// Strategy for generating random RequestStatus values.
fn arb_status() -> impl Strategy<Value = RequestStatus> {
    prop_oneof![
        Just(RequestStatus::Pending),
        Just(RequestStatus::Approved),
        Just(RequestStatus::Rejected),
        Just(RequestStatus::Denied),
    ]
}

/// Strategy for generating random ReviewKind values.
fn arb_kind() -> impl Strategy<Value = ReviewKind> {
    prop_oneof![
        Just(ReviewKind::FundRequest),
        Just(ReviewKind::ServiceApplication),
        Just(ReviewKind::EmergencyRequest),
        Just(ReviewKind::ExtraFunds),
        Just(ReviewKind::Budget),
    ]
}

/// Strategy for generating random roles.
fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

/// Strategy for generating reasons of any length.
fn arb_reason() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[a-zA-Z ]{0,40}".prop_map(Some)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Only the kind's reviewer ever gets a decision back.
    #[test]
    fn prop_only_reviewer_decides(
        kind in arb_kind(),
        role in arb_role(),
        status in arb_status(),
        reason in arb_reason(),
    ) {
        let result = WorkflowService::review(kind, role, 1, Some(status.as_str()), reason.as_deref());
        if role != kind.reviewer() {
            let is_not_reviewer = matches!(result, Err(WorkflowError::NotReviewer { .. }));
            prop_assert!(is_not_reviewer);
        }
    }

    /// A successful review always yields a decided, allowed status.
    #[test]
    fn prop_decisions_are_allowed_and_final(
        kind in arb_kind(),
        status in arb_status(),
        reason in arb_reason(),
    ) {
        if let Ok(decision) = WorkflowService::review(
            kind,
            kind.reviewer(),
            1,
            Some(status.as_str()),
            reason.as_deref(),
        ) {
            prop_assert!(decision.new_status.is_decided());
            prop_assert!(kind.allowed_decisions().contains(&decision.new_status));
            if kind.requires_reason() {
                let reason = decision.reason.unwrap_or_default();
                prop_assert!(reason.chars().count() >= MIN_REASON_CHARS);
            }
        }
    }

    /// Nothing leaves a decided state.
    #[test]
    fn prop_decided_is_terminal(
        kind in arb_kind(),
        current in arb_status(),
        target in arb_status(),
    ) {
        let result = WorkflowService::check_transition(kind, current, target);
        if current.is_decided() {
            let is_already_decided = matches!(result, Err(WorkflowError::AlreadyDecided { .. }));
            prop_assert!(is_already_decided);
            prop_assert!(WorkflowService::ensure_editable(kind, current).is_err());
        } else {
            prop_assert!(WorkflowService::ensure_editable(kind, current).is_ok());
        }
    }

    /// Status names round-trip.
    #[test]
    fn prop_status_round_trip(status in arb_status()) {
        prop_assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
    }
}
