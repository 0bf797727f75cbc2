//! Identity provider client.
//!
//! Access tokens are minted by the platform's OAuth flow on the client side;
//! the API only ever *verifies* them by asking the provider who the token
//! belongs to. Any provider-side failure is surfaced as 401; a request is
//! never downgraded to anonymous.

use async_trait::async_trait;
use corkboard_core::models::AuthUser;
use corkboard_core::AppError;

const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired access token.";

/// Resolves an access token to the user it belongs to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError>;
}

/// Identity provider backed by the platform's auth REST API (`/auth/v1`).
#[derive(Clone)]
pub struct GoTrueProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoTrueProvider {
    pub fn new(base_url: impl Into<String>, api_key: String) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn user_endpoint(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueProvider {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .http
            .get(self.user_endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Identity provider request failed");
                AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "Identity provider rejected token");
            return Err(AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()));
        }

        response.json::<AuthUser>().await.map_err(|e| {
            tracing::warn!(error = %e, "Identity provider returned an unreadable user");
            AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_endpoint_trims_trailing_slash() {
        let provider = GoTrueProvider::new("https://project.supabase.co/", "anon".to_string());
        assert_eq!(
            provider.user_endpoint(),
            "https://project.supabase.co/auth/v1/user"
        );
    }

    #[test]
    fn auth_user_deserializes_provider_payload() {
        // The provider returns far more fields than the API needs.
        let payload = serde_json::json!({
            "id": "ba3f5f4d-2222-4444-9999-f3332b57838f",
            "aud": "authenticated",
            "email": "jason@example.com",
            "app_metadata": { "provider": "github" },
            "created_at": "2026-02-28T00:00:00Z"
        });
        let user: AuthUser = serde_json::from_value(payload).unwrap();
        assert_eq!(
            user.id.to_string(),
            "ba3f5f4d-2222-4444-9999-f3332b57838f"
        );
        assert_eq!(user.email.as_deref(), Some("jason@example.com"));
    }

    #[test]
    fn auth_user_tolerates_missing_email() {
        let payload = serde_json::json!({ "id": "ba3f5f4d-2222-4444-9999-f3332b57838f" });
        let user: AuthUser = serde_json::from_value(payload).unwrap();
        assert!(user.email.is_none());
    }
}
