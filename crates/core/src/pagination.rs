//! Page-number pagination helpers for list endpoints.
//!
//! Clients address pages with `?page=&per_page=` (1-based). Values are
//! clamped here instead of rejected, so a request for page 0 or a huge page
//! size still gets a sensible answer.

use serde::Serialize;

/// Page size used when neither the request nor the configuration supplies one.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound on page size.
pub const MAX_PER_PAGE: i64 = 100;

/// A clamped, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Build a page request from optional query values.
    ///
    /// - `page` is clamped to `>= 1`.
    /// - `per_page` falls back to `default_per_page` and is clamped to `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<i64>, per_page: Option<i64>, default_per_page: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default_per_page).clamp(1, MAX_PER_PAGE),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Number of pages needed to show `total` items, `per_page` at a time.
///
/// Zero items means zero pages.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// Pagination envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub pages: i64,
    pub items: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(request: PageRequest, total: i64, items: Vec<T>) -> Self {
        Self {
            total,
            page: request.page,
            per_page: request.per_page,
            pages: total_pages(total, request.per_page),
            items,
        }
    }
}
