//! Request review workflow.
//!
//! Fund requests, service applications, and the escalations finance raises
//! to government all share one lifecycle: `pending` until a reviewer of
//! the right role records a decision, then terminal.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (RequestStatus, ReviewKind, ReviewDecision)
//! - `error` - Workflow-specific error types
//! - `service` - Decision validation and transition checks

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{MIN_REASON_CHARS, RequestStatus, ReviewDecision, ReviewKind};
