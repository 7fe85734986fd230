//! Shared handling of reviewer decisions.

use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use parkpro_core::workflow::{ReviewKind, WorkflowService};
use parkpro_db::ReviewRepository;

/// Body of every `PUT .../{id}/status` request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusUpdate {
    /// Requested decision.
    pub status: Option<String>,
    /// Justification; required for government decisions.
    pub reason: Option<String>,
}

/// Validates and records a decision on request `id`.
pub(crate) async fn decide(
    state: &AppState,
    user: &AuthUser,
    kind: ReviewKind,
    id: i32,
    update: StatusUpdate,
) -> Result<Json<Value>, ApiError> {
    let decision = WorkflowService::review(
        kind,
        user.role(),
        user.id()?,
        update.status.as_deref(),
        update.reason.as_deref(),
    )?;

    ReviewRepository::new(state.db.clone())
        .decide(id, &decision)
        .await?;

    info!(
        kind = %kind,
        id,
        status = %decision.new_status,
        reviewed_by = decision.reviewed_by,
        "Request reviewed"
    );

    Ok(Json(json!({ "message": decision.success_message() })))
}
