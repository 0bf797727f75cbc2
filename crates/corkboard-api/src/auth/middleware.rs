use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use corkboard_core::AppError;

use crate::auth::models::CurrentUser;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Extract the bearer token from the Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Require a valid access token and attach the resolved user to the request.
///
/// The token is verified against the identity provider on every request;
/// there is no local session cache.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_string(),
        None => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Missing access token"
            );
            return HttpAppError(AppError::Unauthorized(
                "Missing access token.".to_string(),
            ))
            .into_response();
        }
    };

    let user = match state.identity.get_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                error = %e,
                "Invalid access token"
            );
            return HttpAppError(e).into_response();
        }
    };

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        user_id = %user.id,
        "Authenticated request"
    );

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}
