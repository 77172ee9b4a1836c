//! Pagination utilities for service layer
//!
//! `Pagination` carries what the caller asked for (possibly nothing, zero or
//! negative); `normalize` turns it into a valid `PageWindow` under the
//! configured `PageLimits`.

use serde::Serialize;

/// Requested page, as received from the caller. Both values are optional and
/// unchecked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: Option<i64>,
    /// items per page
    pub page_size: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page: Some(page), page_size: Some(page_size) }
    }

    /// Lenient parse of query-string values: anything that is not an integer
    /// is treated as missing.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self { page: parse(page), page_size: parse(page_size) }
    }

    /// Clamp to the limits: page below 1 becomes 1, a missing or non-positive
    /// page size becomes the default, an oversized one becomes the maximum.
    pub fn normalize(self, limits: PageLimits) -> PageWindow {
        let page = match self.page {
            Some(p) if p >= 1 => p as u64,
            _ => 1,
        };
        let page_size = match self.page_size {
            Some(s) if s >= 1 => (s as u64).min(limits.max_page_size),
            _ => limits.default_page_size,
        };
        PageWindow { page, page_size }
    }
}

/// Page-size bounds of one repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl PageLimits {
    /// Keeps `1 <= default_page_size <= max_page_size`.
    pub fn new(default_page_size: u64, max_page_size: u64) -> Self {
        let max_page_size = max_page_size.max(1);
        Self { default_page_size: default_page_size.clamp(1, max_page_size), max_page_size }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(20, 100)
    }
}

impl From<configs::PaginationConfig> for PageLimits {
    fn from(cfg: configs::PaginationConfig) -> Self {
        Self::new(cfg.default_page_size, cfg.max_page_size)
    }
}

/// A validated slice request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Rows to skip. Capped at `i64::MAX`, the largest OFFSET the drivers
    /// bind.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size).min(i64::MAX as u64)
    }
}

/// One page of an ordered result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, window: PageWindow, total: u64) -> Self {
        Self {
            items,
            page: window.page,
            page_size: window.page_size,
            total,
            total_pages: total.div_ceil(window.page_size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let w = Pagination::new(0, 0).normalize(PageLimits::default());
        assert_eq!(w.page, 1);
        assert_eq!(w.page_size, 20);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn normalize_clamps_negative_and_missing() {
        let w = Pagination::new(-3, -10).normalize(PageLimits::default());
        assert_eq!((w.page, w.page_size), (1, 20));
        let w = Pagination::default().normalize(PageLimits::new(5, 50));
        assert_eq!((w.page, w.page_size), (1, 5));
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let w = Pagination::new(5, 1000).normalize(PageLimits::default());
        assert_eq!(w.page, 5);
        assert_eq!(w.page_size, 100);
        assert_eq!(w.offset(), 400);
    }

    #[test]
    fn offset_of_huge_page_fits_i64() {
        let w = Pagination::new(i64::MAX, 100).normalize(PageLimits::default());
        assert_eq!(w.page, i64::MAX as u64);
        assert_eq!(w.offset(), i64::MAX as u64);
        let w = Pagination::new(100_000_000_000_000_000, 100).normalize(PageLimits::default());
        assert_eq!(w.offset(), i64::MAX as u64);
    }

    #[test]
    fn from_query_falls_back_on_garbage() {
        let p = Pagination::from_query(Some("abc"), Some("2.5"));
        assert_eq!(p, Pagination::default());
        let p = Pagination::from_query(Some(" 3 "), Some("15"));
        assert_eq!(p, Pagination::new(3, 15));
    }

    #[test]
    fn limits_keep_default_within_max() {
        let l = PageLimits::new(500, 100);
        assert_eq!(l.default_page_size, 100);
        let l = PageLimits::new(0, 0);
        assert_eq!((l.default_page_size, l.max_page_size), (1, 1));
    }

    #[test]
    fn total_pages_rounds_up() {
        let w = PageWindow { page: 2, page_size: 10 };
        let r = PageResult::new(vec![1, 2, 3, 4, 5], w, 15);
        assert_eq!(r.total_pages, 2);
        let empty: PageResult<u8> = PageResult::new(vec![], w, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn page_result_serializes_camel_case() {
        let r = PageResult::new(vec!["a"], PageWindow { page: 1, page_size: 20 }, 1);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["totalPages"], 1);
    }
}
