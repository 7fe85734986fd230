//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Request extractors
//! - Upload storage and the error mapping shared by every handler

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header::AUTHORIZATION},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use parkpro_shared::JwtService;
use uploads::{UPLOADS_ROUTE, UploadStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Storage for uploaded documents and avatars.
    pub uploads: Arc<UploadStore>,
}

/// Router settings taken from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Creates the main application router.
pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let uploads_dir = state.uploads.dir().to_path_buf();

    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .with_state(state)
}
