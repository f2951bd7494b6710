//! Post query plan
//!
//! Filter, sort key and direction are plain data. Stores either evaluate a
//! plan over an in-process collection with [`PostQuery::apply`] or render it
//! into their native query language.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Pagination, Post};

/// Case-insensitive substring filter over title and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Blank input means no filter.
    pub fn parse(term: Option<&str>) -> Option<Self> {
        let term = term?;
        if term.trim().is_empty() {
            return None;
        }
        Some(Self {
            raw: term.to_owned(),
            folded: term.to_lowercase(),
        })
    }

    /// Term as given by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, post: &Post) -> bool {
        post.title.to_lowercase().contains(&self.folded)
            || post.content.to_lowercase().contains(&self.folded)
    }
}

/// Ordering key for posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation order
    #[default]
    Recency,
    /// Upvote count
    Popular,
    /// Whole-number approval ratio, see [`Post::positivity`]
    Positivity,
}

impl SortKey {
    /// Unknown or missing terms fall back to [`SortKey::Recency`].
    pub fn parse(term: Option<&str>) -> Self {
        let Some(term) = term else {
            return Self::Recency;
        };
        match term.trim().to_lowercase().as_str() {
            "popular" => Self::Popular,
            "positivity" => Self::Positivity,
            "" => Self::Recency,
            other => {
                tracing::debug!(sort_term = other, "unknown sort term, using recency");
                Self::Recency
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recency => "recency",
            Self::Popular => "popular",
            Self::Positivity => "positivity",
        }
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            Self::Recency => (a.created_at, a.id).cmp(&(b.created_at, b.id)),
            Self::Popular => a.upvotes.cmp(&b.upvotes),
            Self::Positivity => a.positivity().cmp(&b.positivity()),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    /// Highest key first
    #[default]
    Descending,
}

impl SortDirection {
    /// Map the caller's direction flag.
    ///
    /// Only `Some(true)` sorts ascending. `Some(false)` and `None` put the
    /// highest key first (most popular, newest).
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Ascending,
            Some(false) | None => Self::Descending,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Complete description of one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub pagination: Pagination,
    pub search: Option<SearchTerm>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl PostQuery {
    /// Plan for the first page in the default ordering.
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            search: None,
            sort: SortKey::default(),
            direction: SortDirection::default(),
        }
    }

    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = SearchTerm::parse(term);
        self
    }

    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = key;
        self.direction = direction;
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.search.as_ref().map_or(true, |term| term.matches(post))
    }

    /// Total order used by every store.
    ///
    /// Ties on popular/positivity keep insertion order (`id` ascending) in
    /// both directions. Recency is unique per post, so it needs no tiebreak.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let primary = self.direction.apply(self.sort.compare(a, b));
        match self.sort {
            SortKey::Recency => primary,
            SortKey::Popular | SortKey::Positivity => primary.then_with(|| a.id.cmp(&b.id)),
        }
    }

    /// Evaluate the plan over an in-process collection.
    ///
    /// Returns the requested page and the number of matching posts.
    pub fn apply<'a, I>(&self, posts: I) -> (Vec<Post>, u64)
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut matching: Vec<&Post> = posts.into_iter().filter(|p| self.matches(p)).collect();
        let total = matching.len() as u64;

        matching.sort_by(|a, b| self.compare(a, b));

        let offset = usize::try_from(self.pagination.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(self.pagination.limit() as usize)
            .cloned()
            .collect();

        (items, total)
    }
}
