//! InMemoryPostStore - Vec-backed post store for tests and development.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{PostSlice, PostStore};
use crate::error::StoreError;
use crate::models::{NewPost, Post};
use crate::query::PostQuery;

/// In-memory post store.
///
/// Posts are kept in insertion order with ids starting at 1. Clone-friendly via Arc.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given posts, in order.
    pub fn seeded<I>(posts: I) -> Self
    where
        I: IntoIterator<Item = NewPost>,
    {
        let now = Utc::now();
        let posts = posts
            .into_iter()
            .enumerate()
            .map(|(i, post)| post.into_post(i as i64 + 1, now))
            .collect();
        Self {
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Post>>, StoreError> {
        self.posts
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Post>>, StoreError> {
        self.posts
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.write()?;
        let id = posts.last().map(|p| p.id + 1).unwrap_or(1);
        let post = post.into_post(id, Utc::now());
        posts.push(post.clone());
        Ok(post)
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let posts = self.read()?;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.len() as u64)
    }

    async fn query(&self, query: &PostQuery) -> Result<PostSlice, StoreError> {
        let posts = self.read()?;
        let (items, total) = query.apply(posts.iter());
        Ok(PostSlice { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;
    use crate::query::{SortDirection, SortKey};

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryPostStore::new();

        let first = store.insert(NewPost::new("first", "a").unwrap()).await.unwrap();
        let second = store.insert(NewPost::new("second", "b").unwrap()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let store = InMemoryPostStore::new();
        store.insert(NewPost::new("only", "post").unwrap()).await.unwrap();

        assert!(store.get(1).await.unwrap().is_some());
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeded_posts_sharing_a_timestamp_order_by_id() {
        let store = InMemoryPostStore::seeded(vec![
            NewPost::new("a", "x").unwrap(),
            NewPost::new("b", "x").unwrap(),
            NewPost::new("c", "x").unwrap(),
        ]);

        let query = PostQuery::new(Pagination::new(1, 10).unwrap());
        let slice = store.query(&query).await.unwrap();
        let titles: Vec<_> = slice.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);

        let query = query.sort(SortKey::Recency, SortDirection::Ascending);
        let slice = store.query(&query).await.unwrap();
        let titles: Vec<_> = slice.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let store = InMemoryPostStore::new();
        let clone = store.clone();
        clone.insert(NewPost::new("shared", "post").unwrap()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }
}
