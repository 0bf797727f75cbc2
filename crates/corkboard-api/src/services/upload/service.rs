//! Upload orchestration for the public image bucket.
//!
//! The pipeline is two typed stages: `validate` (allow-list check, signature
//! detection, declared/detected reconciliation) and `store` (path
//! generation, bucket write, public URL). The first failing check aborts
//! with a caller-fixable error and nothing is written. A storage failure is
//! surfaced unchanged and never retried here; a retry must come back through
//! the pipeline so it gets a fresh object path.

use std::sync::Arc;

use corkboard_core::models::StoredImage;
use corkboard_core::{is_allowed_mime, normalize_mime, AppError, ImageKind};
use corkboard_storage::{build_object_path, Storage, UploadOptions};

use super::types::ValidatedImage;

/// Orchestrates validation and storage for public image uploads.
///
/// Holds no state beyond the injected storage handle; every call is
/// independent and safely concurrent.
pub struct UploadService {
    storage: Arc<dyn Storage>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Stage 1: reconcile the declared MIME type with what the bytes
    /// actually are. Pure; no side effects.
    pub fn validate(data: Vec<u8>, declared_mime: &str) -> Result<ValidatedImage, AppError> {
        if data.is_empty() {
            return Err(AppError::InvalidInput("Image file is required.".to_string()));
        }

        let declared = normalize_mime(declared_mime);
        if !is_allowed_mime(&declared) {
            return Err(AppError::InvalidInput(
                "Unsupported image format. Allowed: jpeg, png, webp, gif.".to_string(),
            ));
        }

        let kind = ImageKind::detect(&data).ok_or_else(|| {
            AppError::InvalidInput("Invalid or corrupted image file.".to_string())
        })?;

        if !kind.matches_declared(&declared) {
            return Err(AppError::InvalidInput(
                "Image type does not match file content.".to_string(),
            ));
        }

        Ok(ValidatedImage { data, kind })
    }

    /// Stage 2: write a validated image under a fresh unique path and
    /// resolve its public URL. The detected type, never the declared one,
    /// becomes the stored content type.
    pub async fn store(
        &self,
        image: ValidatedImage,
        original_filename: &str,
        folder: &str,
    ) -> Result<StoredImage, AppError> {
        let path = build_object_path(original_filename, folder);
        let options = UploadOptions::public_image(image.kind.mime_type());

        self.storage.upload(&path, image.data, &options).await?;

        tracing::info!(
            path = %path,
            content_type = %image.kind.mime_type(),
            "Public image stored"
        );

        let url = self.storage.public_url(&path);
        Ok(StoredImage { path, url })
    }

    /// Full pipeline: validate, then store.
    pub async fn upload_public_image(
        &self,
        data: Vec<u8>,
        declared_mime: &str,
        original_filename: &str,
        folder: &str,
    ) -> Result<StoredImage, AppError> {
        let validated = Self::validate(data, declared_mime)?;
        self.store(validated, original_filename, folder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use corkboard_storage::{
        ListOptions, MemoryStorage, ObjectInfo, StorageError, StorageResult,
    };

    const PNG_SIG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_SIG: [u8; 3] = [0xFF, 0xD8, 0xFF];

    fn png_bytes() -> Vec<u8> {
        let mut buf = PNG_SIG.to_vec();
        buf.resize(32, 0);
        buf
    }

    fn jpeg_bytes() -> Vec<u8> {
        let mut buf = JPEG_SIG.to_vec();
        buf.resize(32, 0);
        buf
    }

    fn webp_bytes() -> Vec<u8> {
        let mut buf = b"RIFF".to_vec();
        buf.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(b"WEBP");
        buf.resize(32, 0);
        buf
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::InvalidInput(msg) => msg,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn png_with_matching_declared_type_is_stored() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let stored = service
            .upload_public_image(png_bytes(), "image/png", "shot.png", "uploads")
            .await
            .unwrap();

        assert!(stored.path.starts_with("uploads/"));
        assert!(stored.path.ends_with(".png"));
        assert_eq!(stored.url, format!("memory://bucket/{}", stored.path));

        let object = storage.get(&stored.path).await.unwrap();
        assert_eq!(object.content_type, "image/png");
        assert_eq!(object.cache_control, "3600");
        assert_eq!(object.data, png_bytes());
    }

    #[tokio::test]
    async fn stored_content_type_is_the_detected_one() {
        // Declared with the legacy alias; the object must carry the
        // canonical detected type.
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let stored = service
            .upload_public_image(jpeg_bytes(), "image/jpg", "photo.jpeg", "uploads")
            .await
            .unwrap();

        let object = storage.get(&stored.path).await.unwrap();
        assert_eq!(object.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn mismatched_content_never_reaches_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let err = service
            .upload_public_image(jpeg_bytes(), "image/gif", "anim.gif", "uploads")
            .await
            .unwrap_err();

        assert_eq!(
            validation_message(err),
            "Image type does not match file content."
        );
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn empty_buffer_is_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let err = service
            .upload_public_image(Vec::new(), "image/png", "empty.png", "uploads")
            .await
            .unwrap_err();

        assert_eq!(validation_message(err), "Image file is required.");
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn disallowed_declared_type_is_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let err = service
            .upload_public_image(png_bytes(), "image/svg+xml", "pic.svg", "uploads")
            .await
            .unwrap_err();

        assert_eq!(
            validation_message(err),
            "Unsupported image format. Allowed: jpeg, png, webp, gif."
        );
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn undetectable_bytes_are_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let err = service
            .upload_public_image(b"hello world!".to_vec(), "image/png", "x.png", "uploads")
            .await
            .unwrap_err();

        assert_eq!(validation_message(err), "Invalid or corrupted image file.");
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn folder_hint_is_normalized() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage.clone());

        let stored = service
            .upload_public_image(webp_bytes(), "image/webp", "clip.webp", "  /my folder/  ")
            .await
            .unwrap();

        assert!(stored.path.starts_with("my folder/"), "{}", stored.path);
        assert!(storage.get(&stored.path).await.is_some());
    }

    #[tokio::test]
    async fn jpg_alias_is_accepted_for_jpeg_bytes() {
        let storage = Arc::new(MemoryStorage::new());
        let service = UploadService::new(storage);

        let result = service
            .upload_public_image(jpeg_bytes(), "image/JPG", "photo.jpg", "uploads")
            .await;
        assert!(result.is_ok());
    }

    /// Storage backend that fails every write; counts attempts so the
    /// no-retry contract is observable.
    struct FailingStorage {
        attempts: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl Storage for FailingStorage {
        async fn upload(
            &self,
            _path: &str,
            _data: Vec<u8>,
            _options: &UploadOptions,
        ) -> StorageResult<()> {
            self.attempts
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(StorageError::UploadFailed("bucket unavailable".to_string()))
        }

        fn public_url(&self, path: &str) -> String {
            format!("memory://bucket/{}", path)
        }

        async fn list(
            &self,
            _prefix: &str,
            _options: &ListOptions,
        ) -> StorageResult<Vec<ObjectInfo>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn storage_failure_is_surfaced_without_retry() {
        let storage = Arc::new(FailingStorage {
            attempts: std::sync::atomic::AtomicUsize::new(0),
        });
        let service = UploadService::new(storage.clone());

        let err = service
            .upload_public_image(png_bytes(), "image/png", "shot.png", "uploads")
            .await
            .unwrap_err();

        match err {
            AppError::Storage(msg) => assert!(msg.contains("bucket unavailable")),
            other => panic!("Expected Storage, got {:?}", other),
        }
        assert_eq!(
            storage.attempts.load(std::sync::atomic::Ordering::SeqCst),
            1
        );
    }

    #[tokio::test]
    async fn concurrent_uploads_never_collide() {
        let storage = Arc::new(MemoryStorage::new());
        let service = Arc::new(UploadService::new(storage.clone()));

        let mut handles = Vec::new();
        for _ in 0..32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .upload_public_image(png_bytes(), "image/png", "same.png", "uploads")
                    .await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(storage.object_count().await, 32);
    }
}
