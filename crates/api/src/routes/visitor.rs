//! Visitor data.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use parkpro_db::entities::{donations, services, tours};
use parkpro_db::{DonationRepository, ServiceApplicationRepository, TourRepository};
use parkpro_shared::Role;

/// Everything a visitor submitted under their email.
#[derive(Debug, Serialize)]
pub struct VisitorData {
    /// Donations.
    pub donations: Vec<donations::Model>,
    /// Tour bookings.
    pub tours: Vec<tours::Model>,
    /// Service applications.
    pub services: Vec<services::Model>,
}

/// Creates the visitor router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/visitor/data", get(visitor_data))
}

/// GET /api/visitor/data - The caller's submissions.
async fn visitor_data(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<VisitorData>, ApiError> {
    user.require_role(Role::Visitor)?;
    let db = state.db.clone();
    let email = user.email();

    Ok(Json(VisitorData {
        donations: DonationRepository::new(db.clone())
            .list_by_email(email)
            .await?,
        tours: TourRepository::new(db.clone()).list_by_email(email).await?,
        services: ServiceApplicationRepository::new(db)
            .list_by_email(email)
            .await?,
    }))
}
