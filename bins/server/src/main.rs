//! Park Pro API Server
//!
//! Main entry point for the Park Pro backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkpro_api::uploads::UploadStore;
use parkpro_api::{AppState, RouterOptions, create_router};
use parkpro_db::connect_pool;
use parkpro_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkpro=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    let secret = config
        .signing_secret()
        .context("Failed to resolve the token signing secret")?;
    if secret.is_fallback() {
        warn!(
            run_mode = %config.run_mode,
            "jwt.secret is not set; signing tokens with the built-in development secret. \
             Anyone with the source can forge sessions"
        );
    }

    // Connect to database
    let db = connect_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig {
        secret: secret.expose().to_string(),
        token_expires_secs: i64::try_from(config.jwt.token_expiry_secs)
            .unwrap_or(JwtConfig::DEFAULT_EXPIRY_SECS),
    });

    let uploads = UploadStore::new(&config.uploads.dir);
    info!(dir = %config.uploads.dir, "Upload storage configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        uploads: Arc::new(uploads),
    };

    // Create router
    let app = create_router(
        state,
        &RouterOptions {
            cors_origins: config.server.cors_origins.clone(),
            max_body_bytes: config.uploads.max_bytes,
        },
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
