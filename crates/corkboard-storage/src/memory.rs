//! In-memory storage backend.
//!
//! Exists so the upload pipeline can be exercised end-to-end in tests
//! without a bucket: the orchestrator takes an injected `dyn Storage`, and
//! this fake records exactly what would have been written (bytes, content
//! type, cache control).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::traits::{ListOptions, ObjectInfo, Storage, StorageError, StorageResult, UploadOptions};

/// Everything recorded about one stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
    pub cache_control: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory storage fake.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored object by its full path.
    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(path).cloned()
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let mut objects = self.objects.lock().await;
        if !options.upsert && objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: options.content_type.clone(),
                cache_control: options.cache_control.clone(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://bucket/{}", path)
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> StorageResult<Vec<ObjectInfo>> {
        let objects = self.objects.lock().await;
        let mut listed: Vec<ObjectInfo> = objects
            .iter()
            .filter_map(|(path, object)| {
                let name = if prefix.is_empty() {
                    path.clone()
                } else {
                    path.strip_prefix(&format!("{}/", prefix))?.to_string()
                };
                Some(ObjectInfo {
                    name,
                    created_at: Some(object.created_at),
                })
            })
            .collect();

        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(listed
            .into_iter()
            .skip(options.offset)
            .take(options.limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_get_record_metadata() {
        let storage = MemoryStorage::new();
        storage
            .upload(
                "uploads/a.png",
                b"png-bytes".to_vec(),
                &UploadOptions::public_image("image/png"),
            )
            .await
            .unwrap();

        let object = storage.get("uploads/a.png").await.unwrap();
        assert_eq!(object.data, b"png-bytes");
        assert_eq!(object.content_type, "image/png");
        assert_eq!(object.cache_control, "3600");
    }

    #[tokio::test]
    async fn test_no_overwrite_without_upsert() {
        let storage = MemoryStorage::new();
        let options = UploadOptions::public_image("image/png");
        storage
            .upload("uploads/a.png", b"first".to_vec(), &options)
            .await
            .unwrap();
        let result = storage
            .upload("uploads/a.png", b"second".to_vec(), &options)
            .await;
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
        assert_eq!(storage.get("uploads/a.png").await.unwrap().data, b"first");
    }

    #[tokio::test]
    async fn test_list_filters_by_prefix() {
        let storage = MemoryStorage::new();
        let options = UploadOptions::public_image("image/png");
        storage
            .upload("uploads/a.png", vec![1], &options)
            .await
            .unwrap();
        storage
            .upload("other/b.png", vec![2], &options)
            .await
            .unwrap();

        let listed = storage.list("uploads", &ListOptions::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "a.png");

        let all = storage.list("", &ListOptions::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
