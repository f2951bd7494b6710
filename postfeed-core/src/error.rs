//! Structured error types for postfeed-core.
//!
//! Out-of-range paging input carries a field tag and a reason code instead
//! of a free-form message, so callers can map it to their own surface.

use std::fmt;

use thiserror::Error;

use crate::models::ValidationError;

/// Paging parameter that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagingField {
    Page,
    PageSize,
}

impl PagingField {
    /// Parameter name as exposed to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::PageSize => "pageSize",
        }
    }
}

impl fmt::Display for PagingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a paging parameter was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeReason {
    /// Value is below the smallest accepted value
    BelowMinimum { minimum: i64 },
}

impl fmt::Display for RangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinimum { minimum } => write!(f, "must be at least {}", minimum),
        }
    }
}

/// Failure reported by a post store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store cannot serve requests (poisoned lock, closed pool)
    #[error("post store unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific failure, propagated unchanged
    #[error("post store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap a backend error
    pub fn backend(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(source))
    }
}

/// Main error type for posts repository operations
#[derive(Error, Debug)]
pub enum PostsError {
    /// Paging parameter outside its accepted range
    #[error("{field} is out of range: {reason} (got {value})")]
    OutOfRange {
        field: PagingField,
        reason: RangeReason,
        value: i64,
    },

    /// Post input failed validation
    #[error("invalid post: {0}")]
    Validation(#[from] ValidationError),

    /// Store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for posts repository operations
pub type Result<T> = std::result::Result<T, PostsError>;

impl PostsError {
    /// Create an out-of-range error for a parameter whose minimum is 1
    pub fn out_of_range(field: PagingField, value: impl Into<i64>) -> Self {
        Self::OutOfRange {
            field,
            reason: RangeReason::BelowMinimum { minimum: 1 },
            value: value.into(),
        }
    }

    /// Name of the offending parameter, for out-of-range errors
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostsError::out_of_range(PagingField::PageSize, 0);
        assert_eq!(err.to_string(), "pageSize is out of range: must be at least 1 (got 0)");

        let err = PostsError::from(ValidationError::Empty { field: "title" });
        assert_eq!(err.to_string(), "invalid post: title cannot be empty");
    }

    #[test]
    fn test_param_name() {
        assert_eq!(
            PostsError::out_of_range(PagingField::Page, -1).param_name(),
            Some("page")
        );
        let store = PostsError::from(StoreError::Unavailable("lock poisoned".into()));
        assert_eq!(store.param_name(), None);
    }

    #[test]
    fn test_store_error_is_transparent() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = PostsError::from(StoreError::backend(io_err));

        assert!(matches!(err, PostsError::Store(StoreError::Backend(_))));
        assert_eq!(err.to_string(), "post store backend error: refused");
    }
}
