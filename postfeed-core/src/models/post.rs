//! Post records and validated post input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for post titles
const MAX_TITLE_LEN: usize = 256;

/// Maximum length for post content
const MAX_CONTENT_LEN: usize = 40_000;

/// Stored post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whole-number approval ratio, `upvotes / (upvotes + downvotes)`.
    ///
    /// Integer division: only posts without downvotes (and at least one
    /// upvote) reach 1. Posts with no votes at all rank 0. The sum is taken
    /// in `i128`, so any pair of `i64` counts is accepted.
    pub fn positivity(&self) -> i64 {
        let upvotes = i128::from(self.upvotes);
        let total = upvotes + i128::from(self.downvotes);
        if total == 0 {
            0
        } else {
            (upvotes / total) as i64
        }
    }
}

/// Validated input for creating a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    upvotes: i64,
    downvotes: i64,
}

impl NewPost {
    /// Create a post with no votes.
    ///
    /// # Rules
    /// - Title non-empty after trimming, max 256 characters (stored trimmed)
    /// - Content non-empty after trimming, max 40 000 characters (stored as given)
    ///
    /// # Example
    /// ```
    /// use postfeed_core::models::NewPost;
    ///
    /// assert!(NewPost::new("Ice Cream", "Vanilla is the best one!").is_ok());
    /// assert!(NewPost::new("   ", "body").is_err());
    /// ```
    pub fn new(title: &str, content: &str) -> Result<Self, ValidationError> {
        Self::with_votes(title, content, 0, 0)
    }

    /// Create a post carrying existing vote counts (imports, fixtures).
    pub fn with_votes(
        title: &str,
        content: &str,
        upvotes: i64,
        downvotes: i64,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();

        if title.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        if content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_LEN,
            });
        }

        if upvotes < 0 {
            return Err(ValidationError::Negative {
                field: "upvotes",
                value: upvotes,
            });
        }
        if downvotes < 0 {
            return Err(ValidationError::Negative {
                field: "downvotes",
                value: downvotes,
            });
        }

        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
            upvotes,
            downvotes,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn upvotes(&self) -> i64 {
        self.upvotes
    }

    pub fn downvotes(&self) -> i64 {
        self.downvotes
    }

    /// Turn validated input into a stored post.
    pub fn into_post(self, id: i64, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(upvotes: i64, downvotes: i64) -> Post {
        NewPost::with_votes("t", "c", upvotes, downvotes)
            .unwrap()
            .into_post(1, Utc::now())
    }

    #[test]
    fn positivity_is_whole_number_ratio() {
        assert_eq!(post(99_999_999, 0).positivity(), 1);
        assert_eq!(post(99_911_999, 1).positivity(), 0);
        assert_eq!(post(1, 998).positivity(), 0);
    }

    #[test]
    fn positivity_handles_extreme_vote_counts() {
        assert_eq!(post(i64::MAX, 1).positivity(), 0);
        assert_eq!(post(i64::MAX, 0).positivity(), 1);
        assert_eq!(post(i64::MAX, i64::MAX).positivity(), 0);
    }

    #[test]
    fn positivity_without_votes_is_zero() {
        assert_eq!(post(0, 0).positivity(), 0);
    }

    #[test]
    fn trims_title() {
        let p = NewPost::new("  Thesis Presentation  ", "soon").unwrap();
        assert_eq!(p.title(), "Thesis Presentation");
    }

    #[test]
    fn rejects_empty_fields() {
        assert_eq!(
            NewPost::new("", "body").unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
        assert_eq!(
            NewPost::new("title", "  ").unwrap_err(),
            ValidationError::Empty { field: "content" }
        );
    }

    #[test]
    fn max_title_length() {
        let title_256 = "a".repeat(256);
        assert!(NewPost::new(&title_256, "body").is_ok());

        let title_257 = "a".repeat(257);
        let err = NewPost::new(&title_257, "body").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));
    }

    #[test]
    fn rejects_negative_votes() {
        let err = NewPost::with_votes("t", "c", -1, 0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Negative {
                field: "upvotes",
                ..
            }
        ));

        let err = NewPost::with_votes("t", "c", 0, -5).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Negative {
                field: "downvotes",
                value: -5
            }
        ));
    }
}
