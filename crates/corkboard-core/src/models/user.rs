use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Application-side user row, created on first sync after OAuth sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserRow {
    pub user_id: Uuid,
    #[schema(example = "jason")]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The identity the OAuth provider vouches for. Only fields the API needs
/// are deserialized; the provider returns many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}
