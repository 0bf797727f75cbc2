//! User sync handler.

use axum::{extract::State, response::IntoResponse, Json};
use corkboard_core::models::UserRow;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::DbState;

#[derive(Serialize, ToSchema)]
pub struct UserSyncResponse {
    pub data: UserRow,
}

/// Ensure the authenticated user has an application row, creating it on
/// first sign-in. Idempotent; an existing row is returned untouched.
#[utoipa::path(
    post,
    path = "/api/users/sync",
    tag = "users",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "User row", body = UserSyncResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(db), fields(user_id = %user.0.id, operation = "sync_user"))]
pub async fn sync_user(
    State(db): State<DbState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let row = db.users.ensure_row(user.0.id).await?;

    tracing::info!(user_id = %row.user_id, "User row synced");

    Ok(Json(UserSyncResponse { data: row }))
}
