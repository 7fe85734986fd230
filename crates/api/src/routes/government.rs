//! Government review of finance escalations.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde_json::Value;

use super::review::{StatusUpdate, decide};
use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};
use parkpro_core::workflow::ReviewKind;
use parkpro_db::EscalationRepository;
use parkpro_db::entities::{budgets, emergency_requests, extra_funds_requests};
use parkpro_shared::Role;

/// Creates the government router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/government/emergency-requests",
            get(list_emergency_requests),
        )
        .route("/api/government/extra-funds", get(list_extra_funds))
        .route("/api/government/budgets", get(list_budgets))
        .route(
            "/api/government/emergency-requests/{id}/status",
            put(review_emergency_request),
        )
        .route(
            "/api/government/extra-funds/{id}/status",
            put(review_extra_funds),
        )
        .route("/api/government/budgets/{id}/status", put(review_budget))
}

fn escalations(state: &AppState) -> EscalationRepository {
    EscalationRepository::new(state.db.clone())
}

/// GET /api/government/emergency-requests
async fn list_emergency_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<emergency_requests::Model>>, ApiError> {
    user.require(Role::can_view_escalations)?;
    Ok(Json(escalations(&state).list_emergency().await?))
}

/// GET /api/government/extra-funds
async fn list_extra_funds(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<extra_funds_requests::Model>>, ApiError> {
    user.require(Role::can_view_escalations)?;
    Ok(Json(escalations(&state).list_extra_funds().await?))
}

/// GET /api/government/budgets
async fn list_budgets(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<budgets::Model>>, ApiError> {
    user.require(Role::can_view_escalations)?;
    Ok(Json(escalations(&state).list_budgets().await?))
}

/// PUT /api/government/emergency-requests/{id}/status
async fn review_emergency_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    decide(&state, &user, ReviewKind::EmergencyRequest, id, update).await
}

/// PUT /api/government/extra-funds/{id}/status
async fn review_extra_funds(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    decide(&state, &user, ReviewKind::ExtraFunds, id, update).await
}

/// PUT /api/government/budgets/{id}/status
async fn review_budget(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    decide(&state, &user, ReviewKind::Budget, id, update).await
}
