//! Image upload handler.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use corkboard_core::models::StoredImage;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::upload::{extract_image_multipart, validate_file_size};

#[derive(Serialize, ToSchema)]
pub struct UploadImageResponse {
    pub data: StoredImage,
}

/// Upload an image into the public bucket.
///
/// The multipart form carries the file in a field named `image` and an
/// optional text field `folder`. The declared content type is checked
/// against the file's magic bytes before anything is written; the stored
/// object's content type is the detected one.
#[utoipa::path(
    post,
    path = "/api/images/upload",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "Missing, unsupported, corrupted, or mismatched image", body = ErrorResponse),
        (status = 413, description = "Image exceeds the size limit", body = ErrorResponse),
        (status = 502, description = "Storage write failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let upload = extract_image_multipart(multipart).await?;
    validate_file_size(upload.data.len(), state.media.max_image_size_bytes)?;

    tracing::debug!(
        declared_mime = %upload.declared_mime,
        size_bytes = upload.data.len(),
        folder = %upload.folder,
        "Processing image upload"
    );

    let service = UploadService::new(state.media.storage.clone());
    let stored = service
        .upload_public_image(
            upload.data,
            &upload.declared_mime,
            &upload.original_filename,
            &upload.folder,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadImageResponse { data: stored }),
    ))
}
