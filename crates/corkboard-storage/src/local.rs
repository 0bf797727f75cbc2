//! Local filesystem storage backend for development.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{ListOptions, ObjectInfo, Storage, StorageError, StorageResult, UploadOptions};

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for object storage (e.g., "/var/lib/corkboard/images")
    /// * `base_url` - Base URL for serving objects (e.g., "http://localhost:3001/images")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert an object path to a filesystem path, rejecting traversal
    /// sequences that could escape the base directory.
    fn key_to_path(&self, object_path: &str) -> StorageResult<PathBuf> {
        if object_path.contains("..") || object_path.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(object_path))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let fs_path = self.key_to_path(path)?;
        let size = data.len();

        if !options.upsert && fs::try_exists(&fs_path).await.unwrap_or(false) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        self.ensure_parent_dir(&fs_path).await?;

        let mut file = fs::File::create(&fs_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create file {}: {}",
                fs_path.display(),
                e
            ))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                fs_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", fs_path.display(), e))
        })?;

        tracing::info!(
            path = %fs_path.display(),
            key = %path,
            size_bytes = size,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> StorageResult<Vec<ObjectInfo>> {
        let dir = if prefix.is_empty() {
            self.base_path.clone()
        } else {
            self.key_to_path(prefix)?
        };

        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?;

        let mut objects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?
        {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| StorageError::ListFailed(e.to_string()))?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let created_at = metadata
                .modified()
                .ok()
                .map(DateTime::<Utc>::from);
            objects.push(ObjectInfo { name, created_at });
        }

        // Newest first, matching the platform backend's sort order.
        objects.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(objects
            .into_iter()
            .skip(options.offset)
            .take(options.limit)
            .collect())
    }
}
