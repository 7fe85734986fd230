//! Workflow domain types for request review.
//!
//! Every reviewable request starts `pending` and is decided exactly once.

use chrono::{DateTime, Utc};
use parkpro_shared::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of the reason a government reviewer must give.
pub const MIN_REASON_CHARS: usize = 10;

/// Status of a reviewable request.
///
/// The valid transitions are:
/// - Pending → Approved
/// - Pending → Rejected (fund requests and escalations)
/// - Pending → Denied (service applications)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision; the only editable state.
    Pending,
    /// Approved by the reviewer.
    Approved,
    /// Rejected by the reviewer.
    Rejected,
    /// Denied by the reviewer (service applications).
    Denied,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Denied => "denied",
        }
    }

    /// Parses a status from its exact lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "denied" => Some(Self::Denied),
            _ => None,
        }
    }

    /// Returns true once a decision has been recorded.
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of request under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewKind {
    /// Park-staff fund request, decided by finance.
    FundRequest,
    /// Vendor service application, decided by finance.
    ServiceApplication,
    /// Emergency funding escalated by finance to government.
    EmergencyRequest,
    /// Extra funding escalated by finance to government.
    ExtraFunds,
    /// Budget proposal escalated by finance to government.
    Budget,
}

impl ReviewKind {
    /// Returns the role allowed to decide this kind of request.
    #[must_use]
    pub const fn reviewer(&self) -> Role {
        match self {
            Self::FundRequest | Self::ServiceApplication => Role::Finance,
            Self::EmergencyRequest | Self::ExtraFunds | Self::Budget => Role::Government,
        }
    }

    /// Returns the decisions a reviewer may record.
    #[must_use]
    pub const fn allowed_decisions(&self) -> &'static [RequestStatus] {
        match self {
            Self::ServiceApplication => &[RequestStatus::Approved, RequestStatus::Denied],
            _ => &[RequestStatus::Approved, RequestStatus::Rejected],
        }
    }

    /// Returns true if the reviewer must justify the decision.
    #[must_use]
    pub const fn requires_reason(&self) -> bool {
        matches!(self.reviewer(), Role::Government)
    }

    /// Returns the table holding requests of this kind.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::FundRequest => "fund_requests",
            Self::ServiceApplication => "services",
            Self::EmergencyRequest => "emergency_requests",
            Self::ExtraFunds => "extra_funds_requests",
            Self::Budget => "budgets",
        }
    }

    /// Returns the human readable name used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FundRequest => "Fund request",
            Self::ServiceApplication => "Service",
            Self::EmergencyRequest => "Emergency request",
            Self::ExtraFunds => "Extra funds request",
            Self::Budget => "Budget",
        }
    }
}

impl fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated decision, ready to be persisted with a conditional update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDecision {
    /// Kind of request decided.
    pub kind: ReviewKind,
    /// The new status.
    pub new_status: RequestStatus,
    /// Id of the reviewing principal within the reviewer role's table.
    pub reviewed_by: i32,
    /// When the decision was made.
    pub reviewed_at: DateTime<Utc>,
    /// Justification, required for government reviews.
    pub reason: Option<String>,
}

impl ReviewDecision {
    /// Returns the message reported to the reviewer.
    #[must_use]
    pub fn success_message(&self) -> String {
        format!("{} {} successfully", self.kind.label(), self.new_status)
    }
}
