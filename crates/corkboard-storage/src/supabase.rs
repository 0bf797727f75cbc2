//! Managed platform bucket backend.
//!
//! Talks to the platform's storage REST API (`/storage/v1`) with the
//! service-role key. No-overwrite semantics are requested with the
//! `x-upsert` header; the platform answers 409 for an existing path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::traits::{ListOptions, ObjectInfo, Storage, StorageError, StorageResult, UploadOptions};

/// Storage backend over the platform's storage REST API.
#[derive(Clone)]
pub struct SupabaseStorage {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
    created_at: Option<DateTime<Utc>>,
}

/// Percent-encode each path segment, preserving `/` separators. Folder names
/// may contain spaces ("my folder"), which must not reach the request line raw.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl SupabaseStorage {
    pub fn new(base_url: impl Into<String>, service_key: String, bucket: String) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            bucket,
            service_key,
        }
    }

    fn object_endpoint(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            encode_path(path)
        )
    }

    fn list_endpoint(&self) -> String {
        format!("{}/storage/v1/object/list/{}", self.base_url, self.bucket)
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let size = data.len();
        let response = self
            .http
            .post(self.object_endpoint(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("content-type", &options.content_type)
            .header("cache-control", &options.cache_control)
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                path = %path,
                size_bytes = size,
                content_type = %options.content_type,
                "Bucket upload successful"
            );
            return Ok(());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        if status.as_u16() == 409 {
            Err(StorageError::AlreadyExists(path.to_string()))
        } else {
            Err(StorageError::UploadFailed(message))
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            encode_path(path)
        )
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> StorageResult<Vec<ObjectInfo>> {
        let body = serde_json::json!({
            "prefix": prefix,
            "limit": options.limit,
            "offset": options.offset,
            "sortBy": { "column": "created_at", "order": "desc" },
        });

        let response = self
            .http
            .post(self.list_endpoint())
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(StorageError::ListFailed(message));
        }

        let objects: Vec<ListedObject> = response
            .json()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?;

        Ok(objects
            .into_iter()
            .map(|o| ObjectInfo {
                name: o.name,
                created_at: o.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new(
            "https://project.supabase.co/",
            "service-role-key".to_string(),
            "post-images".to_string(),
        )
    }

    #[test]
    fn public_url_has_the_public_object_shape() {
        let url = storage().public_url("uploads/123-abc.png");
        assert_eq!(
            url,
            "https://project.supabase.co/storage/v1/object/public/post-images/uploads/123-abc.png"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let url = storage().public_url("my folder/123-abc.png");
        assert!(url.contains("/my%20folder/"), "{}", url);
        assert!(!url.contains(' '));
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let endpoint = storage().object_endpoint("uploads/a.png");
        assert_eq!(
            endpoint,
            "https://project.supabase.co/storage/v1/object/post-images/uploads/a.png"
        );
    }
}
