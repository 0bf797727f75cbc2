use corkboard_core::models::Post;
use corkboard_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for post rows.
///
/// Author names are resolved in SQL with a LEFT JOIN on users, so a post
/// whose author never set a profile name carries `user_name: NULL` without a
/// second query.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all posts, newest id first, with author names joined in.
    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn list_with_authors(&self) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<Postgres, Post>(
            r#"
            SELECT p.id, p.title, p.body, p.user_id, u.user_name, p.created_at
            FROM posts p
            LEFT JOIN users u ON u.user_id = p.user_id
            ORDER BY p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Insert a post owned by `user_id` and return the created row.
    #[tracing::instrument(
        skip(self, title, body),
        fields(db.table = "posts", db.operation = "insert", user_id = %user_id)
    )]
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        user_id: Uuid,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<Postgres, Post>(
            r#"
            INSERT INTO posts (title, body, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, body, user_id, NULL::text AS user_name, created_at
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Delete a post, but only when `user_id` owns it. Returns the number of
    /// rows removed (0 when the post does not exist or belongs to someone
    /// else).
    #[tracing::instrument(
        skip(self),
        fields(db.table = "posts", db.operation = "delete", post_id = id, user_id = %user_id)
    )]
    pub async fn delete_owned(&self, id: i64, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
