//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use corkboard_core::Config;
use corkboard_db::{PostRepository, UserRepository};

use crate::auth::GoTrueProvider;
use crate::state::{AppState, DbState, MediaState};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = storage::setup_storage(&config).await?;

    // Identity provider (validated to be present above)
    let auth_url = config
        .supabase_url
        .clone()
        .context("SUPABASE_URL missing after validation")?;
    let service_key = config
        .supabase_service_role_key
        .clone()
        .context("SUPABASE_SERVICE_ROLE_KEY missing after validation")?;
    let identity = Arc::new(GoTrueProvider::new(auth_url, service_key));

    let state = Arc::new(AppState {
        db: DbState {
            pool: pool.clone(),
            posts: PostRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        },
        media: MediaState {
            storage,
            max_image_size_bytes: config.max_image_size_bytes,
        },
        identity,
        is_production: config.is_production(),
        config: config.clone(),
    });

    // Setup routes
    let router = routes::build_router(&config, state.clone())?;

    Ok((state, router))
}
