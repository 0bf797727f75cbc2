use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A text post. `user_name` is joined from the users table when listing and
/// is `None` for rows whose author never set a profile name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Post {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "My first post")]
    pub title: String,
    #[schema(example = "Hello from the API")]
    pub body: String,
    pub user_id: Uuid,
    #[schema(example = "jason")]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
