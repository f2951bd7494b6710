//! Pagination types

use serde::{Deserialize, Serialize};

use crate::error::{PagingField, PostsError};

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    page: u32,
    /// Items per page (at least 1)
    page_size: u32,
}

impl Pagination {
    /// Validate raw paging input.
    ///
    /// - `page < 1` fails naming `"page"`
    /// - `page_size < 1` fails naming `"pageSize"`
    ///
    /// The page is checked first when both are invalid.
    pub fn new(page: i32, page_size: i32) -> Result<Self, PostsError> {
        let page = u32::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| PostsError::out_of_range(PagingField::Page, page))?;

        let page_size = u32::try_from(page_size)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or_else(|| PostsError::out_of_range(PagingField::PageSize, page_size))?;

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.page_size
    }

    /// Number of items covered by this page and every page before it.
    fn end(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

/// Page of items plus navigation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Items for the current page
    pub items: Vec<T>,
    /// Matching items across all pages
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Page size the envelope was built with
    page_size: u32,
}

impl<T> PagedResult<T> {
    /// Build the envelope. Navigation flags derive from `total_count` and `pagination`.
    pub fn new(items: Vec<T>, total_count: u64, pagination: Pagination) -> Self {
        debug_assert!(items.len() <= pagination.page_size() as usize);
        Self {
            items,
            total_count,
            has_next_page: pagination.end() < total_count,
            has_previous_page: pagination.page() > 1,
            page_size: pagination.page_size(),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u64 {
        if self.total_count == 0 {
            1
        } else {
            self.total_count.div_ceil(u64::from(self.page_size.max(1)))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
            page_size: self.page_size,
        }
    }
}
