//! PostgreSQL post store
//!
//! - Each page request runs in one read-only transaction (count + page)
//! - Filters and sort keys come from the shared query plan, see [`crate::sql`]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postfeed_core::{NewPost, Post, PostQuery, PostSlice, PostStore, StoreError};
use sqlx::{FromRow, PgPool};

use crate::config::DbConfig;
use crate::error::DbError;
use crate::sql::{self, POST_COLUMNS};
use crate::{migrations, pool};

/// Post record from database
#[derive(Debug, Clone, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    upvotes: i64,
    downvotes: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            content: r.content,
            upvotes: r.upvotes,
            downvotes: r.downvotes,
            created_at: r.created_at,
        }
    }
}

/// Post store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using `config` and run migrations.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let pool = pool::create_pool_from_config(config).await?;
        migrations::run(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, DbError> {
        let row: PostRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO posts (title, content, upvotes, downvotes)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.title())
        .bind(post.content())
        .bind(post.upvotes())
        .bind(post.downvotes())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DbError> {
        let row: Option<PostRow> =
            sqlx::query_as(&format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Post::from))
    }

    async fn count_posts(&self) -> Result<u64, DbError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        to_count(total)
    }

    async fn query_page(&self, query: &PostQuery) -> Result<PostSlice, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut count = sql::count_query(query);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await?;

        let mut page = sql::page_query(query);
        let rows: Vec<PostRow> = page.build_query_as::<PostRow>().fetch_all(&mut *tx).await?;

        tx.commit().await?;

        Ok(PostSlice {
            items: rows.into_iter().map(Post::from).collect(),
            total: to_count(total)?,
        })
    }
}

fn to_count(total: i64) -> Result<u64, DbError> {
    u64::try_from(total).map_err(|_| DbError::InvalidRow {
        column: "count",
        reason: format!("negative count {}", total),
    })
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        Ok(self.insert_post(post).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.get_post(id).await?)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.count_posts().await?)
    }

    async fn query(&self, query: &PostQuery) -> Result<PostSlice, StoreError> {
        Ok(self.query_page(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_count_is_invalid() {
        assert_eq!(to_count(8).unwrap(), 8);
        assert!(matches!(
            to_count(-1),
            Err(DbError::InvalidRow { column: "count", .. })
        ));
    }

    #[test]
    fn row_maps_to_post() {
        let created_at = Utc::now();
        let post = Post::from(PostRow {
            id: 3,
            title: "One Like Post".into(),
            content: "this post will get only one like".into(),
            upvotes: 1,
            downvotes: 998,
            created_at,
        });

        assert_eq!(post.id, 3);
        assert_eq!(post.upvotes, 1);
        assert_eq!(post.downvotes, 998);
        assert_eq!(post.created_at, created_at);
    }
}
