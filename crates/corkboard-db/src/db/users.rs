use corkboard_core::models::UserRow;
use corkboard_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for users synced from the identity provider.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the row for `user_id` if it does not exist yet, then return it.
    /// Existing rows (including their user_name) are left untouched.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "users", db.operation = "upsert", user_id = %user_id)
    )]
    pub async fn ensure_row(&self, user_id: Uuid) -> Result<UserRow, AppError> {
        sqlx::query("INSERT INTO users (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<Postgres, UserRow>(
            "SELECT user_id, user_name, created_at FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
