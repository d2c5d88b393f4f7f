//! Pagination types shared by every list endpoint.
//!
//! A [`PageParams`] carries the caller's 1-indexed page number and page size;
//! a [`Pagination`] is the summary block returned next to each result page.
//! Keeping the page-count rule in one place guarantees every endpoint agrees
//! that an empty result set has zero pages, not one.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not supply `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Caller-supplied pagination parameters, already validated to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// 1-indexed page number.
    pub page: i64,
    /// Number of records per page.
    pub limit: i64,
}

impl PageParams {
    /// Create pagination parameters.
    ///
    /// Returns `None` when either value is non-positive; callers map that to
    /// a validation error rather than clamping silently.
    #[must_use]
    pub fn new(page: i64, limit: i64) -> Option<Self> {
        if page < 1 || limit < 1 {
            return None;
        }
        Some(Self { page, limit })
    }

    /// Number of records to skip: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Build the response summary for a total row count.
    #[must_use]
    pub fn summarize(&self, total: i64) -> Pagination {
        Pagination::new(total, self.page, self.limit)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination summary returned alongside each page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total matching records before pagination.
    pub total: i64,
    /// Total page count: 0 when `total` is 0, otherwise `ceil(total / limit)`.
    pub pages: i64,
    /// Current 1-indexed page.
    pub page: i64,
    /// Page size.
    pub limit: i64,
}

impl Pagination {
    /// Compute the summary for a page of a `total`-row result set.
    ///
    /// An empty result set reports zero pages regardless of page size, so a
    /// degenerate `limit` can never divide by zero here.
    #[must_use]
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = if total <= 0 || limit <= 0 {
            0
        } else {
            // `i64::div_ceil` is unstable; both operands are positive here.
            (total as u64).div_ceil(limit as u64) as i64
        };
        Self {
            total,
            pages,
            page,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert!(PageParams::new(0, 10).is_none());
        assert!(PageParams::new(1, 0).is_none());
        assert!(PageParams::new(-3, -1).is_none());
        assert!(PageParams::new(1, 1).is_some());
    }

    #[test]
    fn test_offset() {
        let params = PageParams::new(1, 10).expect("valid");
        assert_eq!(params.offset(), 0);
        let params = PageParams::new(3, 25).expect("valid");
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let summary = Pagination::new(0, 1, 10);
        assert_eq!(summary.pages, 0);
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn test_page_count_is_ceiling() {
        assert_eq!(Pagination::new(1, 1, 10).pages, 1);
        assert_eq!(Pagination::new(10, 1, 10).pages, 1);
        assert_eq!(Pagination::new(11, 1, 10).pages, 2);
        assert_eq!(Pagination::new(99, 1, 10).pages, 10);
    }

    #[test]
    fn test_partition_covers_total_exactly() {
        // Concatenating pages 1..=pages yields exactly `total` records.
        let total = 47;
        let limit = 10;
        let summary = Pagination::new(total, 1, limit);
        let mut seen = 0;
        for page in 1..=summary.pages {
            let params = PageParams::new(page, limit).expect("valid");
            let remaining = total - params.offset();
            seen += remaining.min(limit);
        }
        assert_eq!(seen, total);
    }
}
