//! Image listing handler.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use corkboard_core::models::ImageItem;
use corkboard_storage::{normalize_prefix, ListOptions};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::MediaState;

#[derive(Debug, Deserialize)]
pub struct ImageListQuery {
    #[serde(default)]
    pub prefix: String,
}

#[derive(Serialize, ToSchema)]
pub struct ImageListResponse {
    pub data: Vec<ImageItem>,
}

/// List objects in the public bucket under an optional prefix, newest first
/// (at most 100 entries).
#[utoipa::path(
    get,
    path = "/api/images",
    tag = "images",
    params(
        ("prefix" = Option<String>, Query, description = "Folder prefix to list, e.g. 'uploads'")
    ),
    responses(
        (status = 200, description = "Objects under the prefix", body = ImageListResponse),
        (status = 502, description = "Storage listing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(media), fields(operation = "list_images"))]
pub async fn list_images(
    State(media): State<MediaState>,
    Query(query): Query<ImageListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let prefix = normalize_prefix(&query.prefix);

    let objects = media.storage.list(&prefix, &ListOptions::default()).await?;

    let items = objects
        .into_iter()
        .map(|object| {
            let path = if prefix.is_empty() {
                object.name.clone()
            } else {
                format!("{}/{}", prefix, object.name)
            };
            let url = media.storage.public_url(&path);
            ImageItem {
                name: object.name,
                path,
                url,
            }
        })
        .collect();

    Ok(Json(ImageListResponse { data: items }))
}
