//! Fund requests raised by park staff.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};
use parkpro_core::intake::FundRequestInput;
use parkpro_db::FundRequestRepository;
use parkpro_db::entities::fund_requests;
use parkpro_shared::Role;

use super::admin::{StatCard, StatValue};

/// Creates the fund request router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/fund-requests",
            get(list_fund_requests).post(create_fund_request),
        )
        .route(
            "/api/fund-requests/{id}",
            put(update_fund_request).delete(delete_fund_request),
        )
        .route(
            "/api/park-staff/fund-request-stats",
            get(fund_request_stats),
        )
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatsQuery {
    /// Restricts the counts to one park.
    pub parkname: Option<String>,
}

fn repository(state: &AppState) -> FundRequestRepository {
    FundRequestRepository::new(state.db.clone())
}

/// POST /api/fund-requests - Raise a fund request.
async fn create_fund_request(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<FundRequestInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    user.require_role(Role::ParkStaff)?;
    let staff_id = user.id()?;
    let request = form.validate()?;

    let created = repository(&state).create(staff_id, &request).await?;
    info!(fund_request_id = created.id, staff_id, "Fund request created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Fund request created successfully", "id": created.id })),
    ))
}

/// GET /api/fund-requests - The caller's fund requests.
async fn list_fund_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<fund_requests::Model>>, ApiError> {
    user.require_role(Role::ParkStaff)?;
    let requests = repository(&state).list_for_creator(user.id()?).await?;
    Ok(Json(requests))
}

/// PUT /api/fund-requests/{id} - Edit a pending request.
async fn update_fund_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(form): JsonBody<FundRequestInput>,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::ParkStaff)?;
    let request = form.validate()?;
    repository(&state).update(id, user.id()?, &request).await?;
    Ok(Json(json!({ "message": "Fund request updated successfully" })))
}

/// DELETE /api/fund-requests/{id} - Withdraw a pending request.
async fn delete_fund_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::ParkStaff)?;
    repository(&state).delete(id, user.id()?).await?;
    info!(fund_request_id = id, "Fund request withdrawn");
    Ok(Json(json!({ "message": "Fund request deleted successfully" })))
}

/// GET /api/park-staff/fund-request-stats - Counts of the caller's requests.
async fn fund_request_stats(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::ParkStaff)?;
    let park = query.parkname.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let stats = repository(&state).stats(user.id()?, park).await?;

    let count = |n: i64| StatValue::Count(u64::try_from(n).unwrap_or(0));
    let cards = [
        StatCard::new("All Park Staff Requests", count(stats.total), "FileText"),
        StatCard::new("Pending Requests", count(stats.pending), "Clock"),
        StatCard::new("Approved Requests", count(stats.approved), "CheckCircle"),
        StatCard::new("Rejected Requests", count(stats.rejected), "XCircle"),
    ];
    Ok(Json(json!({ "stats": cards })))
}
