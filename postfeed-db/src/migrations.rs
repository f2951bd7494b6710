//! Database migrations for the posts table

use sqlx::PgPool;

use crate::error::DbError;

/// Run all migrations. Safe to call repeatedly.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running post migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            upvotes BIGINT NOT NULL DEFAULT 0 CHECK (upvotes >= 0),
            downvotes BIGINT NOT NULL DEFAULT 0 CHECK (downvotes >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at, id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_upvotes ON posts(upvotes, id)")
        .execute(pool)
        .await?;

    tracing::info!("Post migrations complete");
    Ok(())
}
