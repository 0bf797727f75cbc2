//! Post handlers: list, create, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use corkboard_core::models::Post;
use corkboard_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::DbState;

#[derive(Serialize, ToSchema)]
pub struct PostListResponse {
    pub data: Vec<Post>,
}

#[derive(Serialize, ToSchema)]
pub struct PostResponse {
    pub data: Post,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "My first post")]
    pub title: Option<String>,
    #[schema(example = "Hello from the API")]
    pub body: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResult {
    pub success: bool,
}

#[derive(Serialize, ToSchema)]
pub struct DeletePostResponse {
    pub data: DeleteResult,
}

/// List all posts, newest first, with author names joined in.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = PostListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(db), fields(operation = "list_posts"))]
pub async fn list_posts(State(db): State<DbState>) -> Result<impl IntoResponse, HttpAppError> {
    let posts = db.posts.list_with_authors().await?;
    Ok(Json(PostListResponse { data: posts }))
}

/// Create a post owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearerAuth" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing title or body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(db, request), fields(user_id = %user.0.id, operation = "create_post"))]
pub async fn create_post(
    State(db): State<DbState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let title = request.title.as_deref().unwrap_or("").trim();
    let body = request.body.as_deref().unwrap_or("").trim();

    if title.is_empty() || body.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "Title and body are required.".to_string(),
        )));
    }

    let post = db.posts.create(title, body, user.0.id).await?;
    Ok((StatusCode::CREATED, Json(PostResponse { data: post })))
}

/// Delete a post the authenticated user owns. Deleting a post that does not
/// exist (or is owned by someone else) is a no-op, reported as success.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearerAuth" = [])),
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted (or nothing to delete)", body = DeletePostResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(db), fields(user_id = %user.0.id, post_id = id, operation = "delete_post"))]
pub async fn delete_post(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = db.posts.delete_owned(id, user.0.id).await?;
    if deleted == 0 {
        tracing::debug!(post_id = id, "Nothing deleted (missing or not owned)");
    }
    Ok(Json(DeletePostResponse {
        data: DeleteResult { success: true },
    }))
}
