//! Post storage abstraction
//!
//! The repository only talks to a [`PostStore`]. Stores evaluate a
//! [`PostQuery`] with whatever native capability they have.

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewPost, Post};
use crate::query::PostQuery;

pub use memory::InMemoryPostStore;

/// One page of posts plus the filtered total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSlice {
    pub items: Vec<Post>,
    /// Posts matching the filter, before paging
    pub total: u64,
}

/// Storage for posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a post, assigning its id and creation time.
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Get a post by id. Returns None if not found.
    async fn get(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Count every stored post.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Filter, sort and slice according to the plan.
    async fn query(&self, query: &PostQuery) -> Result<PostSlice, StoreError>;
}

#[async_trait]
impl<S> PostStore for std::sync::Arc<S>
where
    S: PostStore + ?Sized,
{
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        (**self).insert(post).await
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, StoreError> {
        (**self).get(id).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        (**self).count().await
    }

    async fn query(&self, query: &PostQuery) -> Result<PostSlice, StoreError> {
        (**self).query(query).await
    }
}
