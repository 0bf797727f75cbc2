//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The upload orchestrator receives a `dyn Storage` at
//! construction, so backends can be substituted freely (platform bucket in
//! production, filesystem in development, in-memory in tests).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for corkboard_core::AppError {
    fn from(err: StorageError) -> Self {
        use corkboard_core::AppError;
        match err {
            // Collaborator failures are propagated with their message intact.
            StorageError::UploadFailed(_)
            | StorageError::AlreadyExists(_)
            | StorageError::ListFailed(_)
            | StorageError::BackendError(_) => AppError::Storage(err.to_string()),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::IoError(e) => AppError::Internal(format!("IO error: {}", e)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// Write options for an object upload.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Content type persisted with the object. Callers must pass the
    /// *detected* type, never the client-declared one.
    pub content_type: String,
    /// Cache-control value stored alongside the object.
    pub cache_control: String,
    /// When false (the default), writing to an existing path is an error.
    pub upsert: bool,
}

impl UploadOptions {
    /// Options for a publicly cached image write: one-hour cache, no overwrite.
    pub fn public_image(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            cache_control: "3600".to_string(),
            upsert: false,
        }
    }
}

/// Options for listing a bucket prefix. Results are ordered newest-first by
/// creation time.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

/// One object returned by a listing.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    /// Name relative to the listed prefix.
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Storage abstraction trait
///
/// All storage backends must implement this trait. Keys follow the format
/// documented at the crate root and must not contain `..` or a leading `/`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an object. With `upsert: false` an existing object at the same
    /// path is an error, never silently replaced.
    async fn upload(&self, path: &str, data: Vec<u8>, options: &UploadOptions)
        -> StorageResult<()>;

    /// Publicly accessible URL for an object path. Derivation is
    /// deterministic; no request is made and existence is not checked.
    fn public_url(&self, path: &str) -> String;

    /// List objects under a prefix, newest first.
    async fn list(&self, prefix: &str, options: &ListOptions) -> StorageResult<Vec<ObjectInfo>>;
}
