//! Posts repository - paginated, sortable, searchable post listing
//!
//! Parameters are validated before the store is touched; store failures
//! propagate unchanged.

use tracing::instrument;

use crate::error::{PostsError, Result};
use crate::models::{NewPost, PagedResult, Pagination, Post};
use crate::query::{PostQuery, SortDirection, SortKey};
use crate::store::PostStore;

/// Posts repository over any [`PostStore`]
#[derive(Debug, Clone)]
pub struct PostsRepository<S> {
    store: S,
}

impl<S: PostStore> PostsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get one page of posts.
    ///
    /// - `page` and `page_size` must be at least 1, otherwise
    ///   [`PostsError::OutOfRange`] names `"page"` or `"pageSize"`
    /// - `search_term` filters title or content, case-insensitively; blank means no filter
    /// - `sort_term` is `"popular"` or `"positivity"`; anything else sorts by recency
    /// - `sort_ascending`: `Some(true)` puts the lowest key first, otherwise highest first
    ///
    /// A search matching nothing is an empty page, not an error.
    #[instrument(skip(self), fields(sort = tracing::field::Empty))]
    pub async fn get_posts(
        &self,
        page: i32,
        page_size: i32,
        search_term: Option<&str>,
        sort_term: Option<&str>,
        sort_ascending: Option<bool>,
    ) -> Result<PagedResult<Post>> {
        let pagination = Pagination::new(page, page_size).map_err(|e| {
            tracing::debug!(error = %e, "rejected paging parameters");
            e
        })?;

        let query = PostQuery::new(pagination)
            .search(search_term)
            .sort(
                SortKey::parse(sort_term),
                SortDirection::from_flag(sort_ascending),
            );
        tracing::Span::current().record("sort", query.sort.as_str());

        self.query(&query).await
    }

    /// Run a validated query plan.
    #[instrument(skip_all, fields(
        page = query.pagination.page(),
        page_size = query.pagination.page_size(),
        sort = query.sort.as_str(),
    ))]
    pub async fn query(&self, query: &PostQuery) -> Result<PagedResult<Post>> {
        let slice = self.store.query(query).await.map_err(|e| {
            tracing::error!(error = %e, "post query failed");
            PostsError::from(e)
        })?;

        tracing::debug!(
            returned = slice.items.len(),
            total = slice.total,
            "post page loaded"
        );

        Ok(PagedResult::new(slice.items, slice.total, query.pagination))
    }

    /// Store a new post.
    pub async fn add_post(&self, post: NewPost) -> Result<Post> {
        let post = self.store.insert(post).await?;
        tracing::info!(id = post.id, "post created");
        Ok(post)
    }

    /// Get a single post by id.
    pub async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        Ok(self.store.get(id).await?)
    }

    /// Count every stored post, ignoring filters.
    pub async fn count_posts(&self) -> Result<u64> {
        Ok(self.store.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::StoreError;
    use crate::store::{InMemoryPostStore, PostSlice};

    /// Store that fails every call and counts how often it was reached.
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PostStore for FailingStore {
        async fn insert(&self, _post: NewPost) -> std::result::Result<Post, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn get(&self, _id: i64) -> std::result::Result<Option<Post>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn count(&self) -> std::result::Result<u64, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn query(&self, _query: &PostQuery) -> std::result::Result<PostSlice, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
            Err(StoreError::backend(io))
        }
    }

    #[tokio::test]
    async fn validation_happens_before_store_access() {
        let store = Arc::new(FailingStore::default());
        let repo = PostsRepository::new(Arc::clone(&store));

        let err = repo.get_posts(0, 10, None, None, None).await.unwrap_err();
        assert_eq!(err.param_name(), Some("page"));

        let err = repo.get_posts(1, 0, None, None, None).await.unwrap_err();
        assert_eq!(err.param_name(), Some("pageSize"));

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = Arc::new(FailingStore::default());
        let repo = PostsRepository::new(Arc::clone(&store));

        let err = repo.get_posts(1, 10, None, None, None).await.unwrap_err();
        assert!(matches!(err, PostsError::Store(StoreError::Backend(_))));
        assert_eq!(err.param_name(), None);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn add_then_get_post() {
        let repo = PostsRepository::new(InMemoryPostStore::new());

        let created = repo
            .add_post(NewPost::with_votes("Ice Cream", "Vanilla", 5, 1).unwrap())
            .await
            .unwrap();
        let loaded = repo.get_post(created.id).await.unwrap().unwrap();

        assert_eq!(loaded, created);
        assert_eq!(repo.count_posts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn dyn_store_behind_arc() {
        let store: Arc<dyn PostStore> = Arc::new(InMemoryPostStore::new());
        let repo = PostsRepository::new(store);
        repo.add_post(NewPost::new("boxed", "store").unwrap())
            .await
            .unwrap();

        let page = repo.get_posts(1, 5, Some("BOXED"), None, None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 1);
    }
}
