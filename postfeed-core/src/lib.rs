//! postfeed-core: paginated post listing
//!
//! Validates paging input, filters posts by a search term, sorts them by
//! recency, popularity or positivity and returns one page with navigation
//! metadata. Storage sits behind the [`PostStore`] trait.

pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod store;

pub use error::{PagingField, PostsError, RangeReason, Result, StoreError};
pub use models::{NewPost, PagedResult, Pagination, Post, ValidationError};
pub use query::{PostQuery, SearchTerm, SortDirection, SortKey};
pub use repository::PostsRepository;
pub use store::{InMemoryPostStore, PostSlice, PostStore};
