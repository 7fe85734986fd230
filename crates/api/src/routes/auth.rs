//! Login entry points and visitor self-registration.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody};
use parkpro_core::auth::{AuthService, LoginEntry};
use parkpro_core::intake::VisitorRegistration;
use parkpro_db::PrincipalRepository;
use parkpro_shared::Role;
use parkpro_shared::auth::{LoginRequest, LoginResponse};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/admin/login", post(admin_login))
        .route("/api/visitor/login", post(visitor_login))
        .route("/api/visitor/register", post(register_visitor))
}

async fn authenticate(
    state: &AppState,
    entry: LoginEntry,
    payload: LoginRequest,
) -> Result<Json<LoginResponse>, ApiError> {
    let service = AuthService::new(
        PrincipalRepository::new(state.db.clone()),
        state.jwt_service.clone(),
    );
    let outcome = service
        .login(entry, payload.email.as_deref(), payload.password.as_deref())
        .await?;
    Ok(Json(outcome.into_response()))
}

/// POST /api/login - Authenticate any staff principal.
async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    authenticate(&state, LoginEntry::Staff, payload).await
}

/// POST /api/admin/login - Authenticate an administrator.
async fn admin_login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    authenticate(&state, LoginEntry::Admin, payload).await
}

/// POST /api/visitor/login - Authenticate a visitor.
async fn visitor_login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    authenticate(&state, LoginEntry::Visitor, payload).await
}

/// POST /api/visitor/register - Create a visitor account.
async fn register_visitor(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<VisitorRegistration>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let principal = form.validate()?;
    let repo = PrincipalRepository::new(state.db.clone());

    if repo.email_in_use(&principal.email, None).await? {
        return Err(ApiError::conflict("Email already exists"));
    }

    let key = repo.create(Role::Visitor, &principal).await?;
    info!(visitor_id = key.id, "Visitor registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful", "id": key.id })),
    ))
}
