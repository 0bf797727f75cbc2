//! Storage setup and initialization

use std::sync::Arc;

use anyhow::Result;
use corkboard_core::Config;
use corkboard_storage::{create_storage, Storage};

/// Setup the configured storage backend.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %config.storage_backend,
        bucket = %config.storage_bucket,
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
