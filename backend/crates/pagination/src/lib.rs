//! Page/limit pagination primitives for list endpoints.
//!
//! List endpoints return the full collection unless the caller opts in with
//! `?page=` and/or `?limit=`. [`PageQuery`] captures the raw query string
//! values and [`PageRequest`] is the validated window handed to repositories.
//!
//! ```
//! use pagination::{PageQuery, PageRequest};
//!
//! let query = PageQuery { page: Some(2), limit: None };
//! let request = query.into_request()?.expect("page requested");
//! assert_eq!(request.offset(), 20);
//! assert_eq!(request.limit(), 20);
//! # Ok::<(), pagination::PageRequestError>(())
//! ```

use serde::{Deserialize, Serialize};

/// Page size applied when the caller supplies `page` without `limit`.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised when building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// Limits must fall within `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange {
        /// The configured upper bound.
        max: u32,
    },
}

/// Raw pagination query parameters as received from the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// One-based page number.
    pub page: Option<u32>,
    /// Maximum number of items per page.
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Validate the query, returning `None` when no pagination was requested.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is out of range.
    pub fn into_request(self) -> Result<Option<PageRequest>, PageRequestError> {
        match (self.page, self.limit) {
            (None, None) => Ok(None),
            (page, limit) => {
                PageRequest::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_LIMIT)).map(Some)
            }
        }
    }
}

/// Validated pagination window.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a pagination window.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `limit` falls
    /// outside `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items in this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Apply the window to an already ordered, fully materialised list.
    #[must_use]
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}
