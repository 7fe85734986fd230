//! Park-staff management by administrators.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};
use parkpro_core::auth::{PrincipalKey, PrincipalRecord};
use parkpro_core::intake::{PasswordReset, StaffInput};
use parkpro_db::PrincipalRepository;
use parkpro_shared::Role;

/// Creates the staff management router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/park-staff", get(list_park_staff).post(create_park_staff))
        .route(
            "/api/park-staff/{id}",
            put(update_park_staff).delete(delete_park_staff),
        )
        .route("/api/park-staff/password/{id}", put(reset_password))
        .route("/api/park-staff/update-login/{id}", put(update_login))
        .route("/api/staff", get(list_all_staff))
}

/// A park-staff member as listed to administrators.
#[derive(Debug, Serialize)]
pub struct ParkStaffView {
    id: i32,
    first_name: String,
    last_name: String,
    name: String,
    email: String,
    park: String,
    role: Role,
    last_login: String,
}

impl From<PrincipalRecord> for ParkStaffView {
    fn from(record: PrincipalRecord) -> Self {
        let profile = record.profile;
        Self {
            id: record.key.id,
            name: format!("{} {}", profile.first_name, profile.last_name),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            park: profile.park_name.unwrap_or_default(),
            role: record.key.role,
            last_login: profile
                .last_login
                .map_or_else(|| "Never".to_string(), |at| at.format("%Y-%m-%d").to_string()),
        }
    }
}

/// A staff principal of any role.
#[derive(Debug, Serialize)]
pub struct StaffView {
    id: i32,
    name: String,
    email: String,
    role: Role,
    park: String,
}

impl From<PrincipalRecord> for StaffView {
    fn from(record: PrincipalRecord) -> Self {
        let profile = record.profile;
        Self {
            id: record.key.id,
            name: format!("{} {}", profile.first_name, profile.last_name),
            email: profile.email,
            role: record.key.role,
            park: profile.park_name.unwrap_or_default(),
        }
    }
}

fn park_staff(id: i32) -> PrincipalKey {
    PrincipalKey::new(Role::ParkStaff, id)
}

fn repository(state: &AppState) -> PrincipalRepository {
    PrincipalRepository::new(state.db.clone())
}

fn staff_not_found() -> ApiError {
    ApiError::not_found("Staff member not found")
}

/// GET /api/park-staff - List park staff.
async fn list_park_staff(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ParkStaffView>>, ApiError> {
    user.require(Role::can_manage_staff)?;
    let staff = repository(&state).list(Role::ParkStaff).await?;
    Ok(Json(staff.into_iter().map(ParkStaffView::from).collect()))
}

/// POST /api/park-staff - Add a park-staff member.
async fn create_park_staff(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<StaffInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    user.require(Role::can_manage_staff)?;
    let new = form.validate_new()?;
    let repo = repository(&state);

    if repo.email_in_use(&new.email, None).await? {
        return Err(ApiError::conflict("Email already exists"));
    }

    let key = repo.create(Role::ParkStaff, &new).await?;
    info!(staff_id = key.id, "Park staff added");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Park staff added successfully", "id": key.id })),
    ))
}

/// PUT /api/park-staff/{id} - Edit a park-staff member.
async fn update_park_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(form): JsonBody<StaffInput>,
) -> Result<Json<Value>, ApiError> {
    user.require(Role::can_manage_staff)?;
    let changes = form.validate_update()?;
    let repo = repository(&state);
    let key = park_staff(id);

    if repo.find_by_id(key).await?.is_none() {
        return Err(staff_not_found());
    }
    if repo.email_in_use(&changes.email, Some(key)).await? {
        return Err(ApiError::conflict(
            "Email already in use by another staff member",
        ));
    }

    repo.update_profile(key, &changes).await?;
    Ok(Json(json!({ "message": "Park staff updated successfully" })))
}

/// DELETE /api/park-staff/{id} - Remove a park-staff member.
async fn delete_park_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    user.require(Role::can_manage_staff)?;
    if repository(&state).delete(park_staff(id)).await? == 0 {
        return Err(staff_not_found());
    }
    info!(staff_id = id, "Park staff deleted");
    Ok(Json(json!({ "message": "Park staff deleted successfully" })))
}

/// PUT /api/park-staff/password/{id} - Reset a park-staff password.
async fn reset_password(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    JsonBody(form): JsonBody<PasswordReset>,
) -> Result<Json<Value>, ApiError> {
    user.require(Role::can_manage_staff)?;
    let credential = form
        .into_credential()
        .map_err(|_| ApiError::validation("Password is required"))?;

    if repository(&state)
        .update_password_hash(park_staff(id), &credential)
        .await?
        == 0
    {
        return Err(staff_not_found());
    }
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

/// PUT /api/park-staff/update-login/{id} - Stamp a staff member's last login.
async fn update_login(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    user.require(Role::can_manage_staff)?;
    if repository(&state).touch_last_login(park_staff(id)).await? == 0 {
        return Err(staff_not_found());
    }
    Ok(Json(
        json!({ "message": "Last login time updated successfully" }),
    ))
}

/// GET /api/staff - List staff principals of every role.
async fn list_all_staff(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<StaffView>>, ApiError> {
    user.require(Role::can_manage_staff)?;
    let staff = repository(&state).list_staff().await?;
    Ok(Json(staff.into_iter().map(StaffView::from).collect()))
}
