//! Administrator self-service and dashboard endpoints.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};
use parkpro_core::auth::verify_and_maybe_migrate;
use parkpro_core::intake::{PasswordChange, ProfileInput, UploadedFile};
use parkpro_db::{DonationRepository, PrincipalRepository, TourRepository};
use parkpro_db::repositories::{MonthlyAmount, MonthlyBookings, RecentLogin};
use parkpro_shared::Role;

/// Number of entries returned by the recent logins panel.
const RECENT_LOGIN_LIMIT: u64 = 5;

/// Creates the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/profile", put(update_profile))
        .route("/api/admin/avatar", post(upload_avatar))
        .route("/api/admin/account", delete(delete_account))
        .route("/api/admin/password", put(change_password))
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/donations", get(monthly_donations))
        .route("/api/admin/tour-bookings", get(monthly_tour_bookings))
        .route("/api/admin/recent-logins", get(recent_logins))
}

/// Value shown on a dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    /// A number of rows.
    Count(u64),
    /// A money total.
    Amount(#[serde(with = "rust_decimal::serde::float")] Decimal),
}

/// One dashboard card.
#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    /// Card title.
    pub title: &'static str,
    /// Displayed value.
    pub value: StatValue,
    /// Icon name understood by the client.
    pub icon: &'static str,
    /// Trend arrow, when the card shows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<&'static str>,
}

impl StatCard {
    /// Creates a card without a trend arrow.
    #[must_use]
    pub const fn new(title: &'static str, value: StatValue, icon: &'static str) -> Self {
        Self {
            title,
            value,
            icon,
            trend: None,
        }
    }

    /// Adds an upward trend arrow.
    #[must_use]
    pub const fn trending_up(mut self) -> Self {
        self.trend = Some("up");
        self
    }
}

#[derive(Debug, Serialize)]
struct RecentLoginView {
    id: i32,
    name: String,
    email: String,
    role: Role,
    last_login: DateTime<Utc>,
}

impl From<RecentLogin> for RecentLoginView {
    fn from(login: RecentLogin) -> Self {
        Self {
            id: login.key.id,
            name: login.name,
            email: login.email,
            role: login.key.role,
            last_login: login.last_login,
        }
    }
}

fn admin_not_found() -> ApiError {
    ApiError::not_found("Admin not found")
}

/// PUT /api/admin/profile - Update the caller's profile.
async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<ProfileInput>,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let key = user.key()?;
    let changes = form.validate()?;
    let repo = PrincipalRepository::new(state.db.clone());

    if repo.email_in_use(&changes.email, Some(key)).await? {
        return Err(ApiError::conflict("Email already in use"));
    }
    if repo.update_profile(key, &changes).await? == 0 {
        return Err(admin_not_found());
    }

    let updated = repo.find_by_id(key).await?.ok_or_else(admin_not_found)?;
    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": updated.user_info(),
    })))
}

/// POST /api/admin/avatar - Replace the caller's avatar.
async fn upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let key = user.key()?;

    let mut avatar = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("avatar") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?.to_vec();
            avatar = Some(UploadedFile { file_name, bytes });
        }
    }

    let avatar = avatar.ok_or_else(|| ApiError::validation("No avatar file provided"))?;
    if avatar.file_name.is_empty() || avatar.bytes.is_empty() {
        return Err(ApiError::validation("No selected file"));
    }

    let url = state.uploads.save("avatar", &avatar).await?;
    if PrincipalRepository::new(state.db.clone())
        .update_avatar(key, &url)
        .await?
        == 0
    {
        return Err(admin_not_found());
    }

    info!(admin_id = key.id, "Avatar updated");
    Ok(Json(json!({
        "message": "Avatar updated successfully",
        "avatarUrl": url,
    })))
}

/// DELETE /api/admin/account - Delete the caller's account.
async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let key = user.key()?;

    if PrincipalRepository::new(state.db.clone())
        .delete(key)
        .await?
        == 0
    {
        return Err(admin_not_found());
    }

    info!(admin_id = key.id, "Admin account deleted");
    Ok(Json(json!({ "message": "Account deleted successfully" })))
}

/// PUT /api/admin/password - Change the caller's password.
async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(form): JsonBody<PasswordChange>,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let key = user.key()?;
    let change = form.validate()?;
    let repo = PrincipalRepository::new(state.db.clone());

    let record = repo.find_by_id(key).await?.ok_or_else(admin_not_found)?;
    if !verify_and_maybe_migrate(&change.current_password, &record.credential).matched {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    repo.update_password_hash(key, &change.new_credential)
        .await?;
    info!(admin_id = key.id, "Admin password changed");
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

/// GET /api/admin/stats - Dashboard headline figures.
async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let db = state.db.clone();
    let principals = PrincipalRepository::new(db.clone());

    let tours = TourRepository::new(db.clone()).count().await?;
    let donations = DonationRepository::new(db).total().await?;
    let admins = principals.count(Role::Admin).await?;
    let park_staff = principals.count(Role::ParkStaff).await?;

    let cards = [
        StatCard::new("Total Tours Booked", StatValue::Count(tours), "Calendar").trending_up(),
        StatCard::new("Total Donations", StatValue::Amount(donations), "Cash").trending_up(),
        StatCard::new("Total Admins", StatValue::Count(admins), "LogIn").trending_up(),
        StatCard::new("Recorded Park stuffs", StatValue::Count(park_staff), "Users")
            .trending_up(),
    ];
    Ok(Json(json!({ "stats": cards })))
}

/// GET /api/admin/donations - Donation totals per month.
async fn monthly_donations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let months: Vec<MonthlyAmount> = DonationRepository::new(state.db.clone())
        .monthly_totals()
        .await?;
    Ok(Json(json!({ "donations": months })))
}

/// GET /api/admin/tour-bookings - Tour bookings per month.
async fn monthly_tour_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let months: Vec<MonthlyBookings> = TourRepository::new(state.db.clone())
        .monthly_bookings()
        .await?;
    Ok(Json(json!({ "tour_bookings": months })))
}

/// GET /api/admin/recent-logins - Most recent logins across all roles.
async fn recent_logins(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;
    let logins: Vec<RecentLoginView> = PrincipalRepository::new(state.db.clone())
        .recent_logins(RECENT_LOGIN_LIMIT)
        .await?
        .into_iter()
        .map(RecentLoginView::from)
        .collect();
    Ok(Json(json!({ "recent_logins": logins })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stat_values_serialize_as_numbers() {
        let cards = [
            StatCard::new("Total Tours Booked", StatValue::Count(4), "Calendar").trending_up(),
            StatCard::new("Total Donations", StatValue::Amount(dec!(150.50)), "Cash"),
        ];

        assert_eq!(
            serde_json::to_value(cards).unwrap(),
            json!([
                {"title": "Total Tours Booked", "value": 4, "icon": "Calendar", "trend": "up"},
                {"title": "Total Donations", "value": 150.5, "icon": "Cash"},
            ])
        );
    }
}
