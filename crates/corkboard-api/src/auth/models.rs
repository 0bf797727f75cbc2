use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use corkboard_core::models::AuthUser;

use crate::error::ErrorResponse;

/// Authenticated user stored in request extensions by the auth middleware.
///
/// Implemented as FromRequestParts so it composes with Multipart (Extension
/// cannot be the last extractor alongside a body-consuming one).
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing access token.", "UNAUTHORIZED")),
            )
        })
    }
}
