//! Finance: record review, fund request and service decisions, and
//! escalations to government.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tracing::info;

use super::review::{StatusUpdate, decide};
use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};
use parkpro_core::intake::{BudgetInput, EmergencyRequestInput, ExtraFundsInput};
use parkpro_core::workflow::ReviewKind;
use parkpro_db::entities::{budgets, donations, services, tours};
use parkpro_db::repositories::FundRequestWithStaff;
use parkpro_db::{
    DonationRepository, EscalationRepository, FundRequestRepository,
    ServiceApplicationRepository, TourRepository,
};
use parkpro_shared::Role;

/// Creates the finance router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/finance/tours", get(list_tours))
        .route("/api/finance/donations", get(list_donations))
        .route("/api/finance/services", get(list_services))
        .route("/api/finance/fund-requests", get(list_fund_requests))
        .route("/api/finance/services/{id}/status", put(review_service))
        .route(
            "/api/finance/fund-requests/{id}/status",
            put(review_fund_request),
        )
        .route(
            "/api/finance/emergency-requests",
            post(create_emergency_request),
        )
        .route("/api/finance/extra-funds", post(create_extra_funds))
        .route("/api/finance/budgets", get(list_budgets).post(create_budget))
}

/// GET /api/finance/tours - All tour bookings.
async fn list_tours(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<tours::Model>>, ApiError> {
    user.require(Role::can_view_finance_records)?;
    Ok(Json(TourRepository::new(state.db.clone()).list_all().await?))
}

/// GET /api/finance/donations - All donations.
async fn list_donations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<donations::Model>>, ApiError> {
    user.require(Role::can_view_finance_records)?;
    Ok(Json(
        DonationRepository::new(state.db.clone())
            .list_all()
            .await?,
    ))
}

/// GET /api/finance/services - All service applications.
async fn list_services(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<services::Model>>, ApiError> {
    user.require(Role::can_view_finance_records)?;
    Ok(Json(
        ServiceApplicationRepository::new(state.db.clone())
            .list_all()
            .await?,
    ))
}

/// GET /api/finance/fund-requests - All fund requests with their creators.
async fn list_fund_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<FundRequestWithStaff>>, ApiError> {
    user.require(Role::can_view_finance_records)?;
    Ok(Json(
        FundRequestRepository::new(state.db.clone())
            .list_with_staff()
            .await?,
    ))
}

/// PUT /api/finance/services/{id}/status - Approve or deny an application.
async fn review_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    decide(&state, &user, ReviewKind::ServiceApplication, id, update).await
}

/// PUT /api/finance/fund-requests/{id}/status - Approve or reject a fund request.
async fn review_fund_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    decide(&state, &user, ReviewKind::FundRequest, id, update).await
}

fn escalations(state: &AppState) -> EscalationRepository {
    EscalationRepository::new(state.db.clone())
}

/// POST /api/finance/emergency-requests - Escalate an emergency.
async fn create_emergency_request(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<EmergencyRequestInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    user.require(Role::can_escalate)?;
    let request = form.validate()?;
    let created = escalations(&state)
        .create_emergency(user.id()?, &request)
        .await?;
    info!(emergency_request_id = created.id, "Emergency request submitted");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Emergency request submitted successfully", "id": created.id })),
    ))
}

/// POST /api/finance/extra-funds - Request additional funding.
async fn create_extra_funds(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<ExtraFundsInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    user.require(Role::can_escalate)?;
    let request = form.validate()?;
    let created = escalations(&state)
        .create_extra_funds(user.id()?, &request)
        .await?;
    info!(extra_funds_id = created.id, "Extra funds request submitted");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Extra funds request submitted successfully", "id": created.id })),
    ))
}

/// POST /api/finance/budgets - Propose a budget.
async fn create_budget(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<BudgetInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    user.require(Role::can_escalate)?;
    let budget = form.validate()?;
    let created = escalations(&state)
        .create_budget(user.id()?, &budget)
        .await?;
    info!(budget_id = created.id, "Budget submitted");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Budget submitted successfully", "id": created.id })),
    ))
}

/// GET /api/finance/budgets - All budget proposals.
async fn list_budgets(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<budgets::Model>>, ApiError> {
    user.require(Role::can_view_escalations)?;
    Ok(Json(escalations(&state).list_budgets().await?))
}
