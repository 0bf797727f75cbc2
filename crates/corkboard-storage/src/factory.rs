//! Storage factory
//!
//! Creates the configured storage backend. The rest of the application only
//! sees `Arc<dyn Storage>`.

use std::sync::Arc;

use corkboard_core::{Config, StorageBackend};

use crate::local::LocalStorage;
use crate::supabase::SupabaseStorage;
use crate::traits::{Storage, StorageError, StorageResult};

/// Create the storage backend selected by configuration.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Supabase => {
            let base_url = config.supabase_url.clone().ok_or_else(|| {
                StorageError::ConfigError(
                    "SUPABASE_URL must be set for the supabase storage backend".to_string(),
                )
            })?;
            let service_key = config.supabase_service_role_key.clone().ok_or_else(|| {
                StorageError::ConfigError(
                    "SUPABASE_SERVICE_ROLE_KEY must be set for the supabase storage backend"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(SupabaseStorage::new(
                base_url,
                service_key,
                config.storage_bucket.clone(),
            )))
        }
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError(
                    "LOCAL_STORAGE_PATH must be set for the local storage backend".to_string(),
                )
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError(
                    "LOCAL_STORAGE_BASE_URL must be set for the local storage backend".to_string(),
                )
            })?;
            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}
