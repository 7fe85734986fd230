//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod admin;
pub mod auth;
pub mod finance;
pub mod fund_requests;
pub mod government;
pub mod health;
pub mod intake;
pub mod review;
pub mod staff;
pub mod visitor;

/// Creates the API router; everything outside login, registration and
/// public intake sits behind the auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(staff::routes())
        .merge(admin::routes())
        .merge(fund_requests::routes())
        .merge(finance::routes())
        .merge(government::routes())
        .merge(visitor::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(intake::routes())
        .merge(protected_routes)
}
