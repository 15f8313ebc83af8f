//! Page-number pagination shared by every listing endpoint.
//!
//! Public pages address results by 1-based page number and page size rather
//! than raw offsets, so clamping happens here once instead of per query.

use serde::Serialize;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Normalized `(page, per_page)` pair. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Build from optional user input. Pages below 1 become 1; page sizes are
    /// clamped into `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: clamp_limit(per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Number of pages needed to show `total` rows.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.per_page - 1) / self.per_page
        }
    }

    /// Slice an already filtered and ordered collection down to this page.
    pub fn slice<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        rows.iter()
            .skip(self.offset() as usize)
            .take(self.per_page as usize)
            .cloned()
            .collect()
    }
}

/// A page of results plus the totals the UI needs for pagination controls.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub total_pages: i64,
    pub page: i64,
    pub per_page: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, pagination: Pagination) -> Self {
        Self {
            items,
            total_count,
            total_pages: pagination.total_pages(total_count),
            page: pagination.page,
            per_page: pagination.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_missing() {
        let p = Pagination::new(None, None);
        assert_eq!(p, Pagination { page: 1, per_page: 10 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn page_two_of_ten_starts_at_offset_ten() {
        let p = Pagination::new(Some(2), Some(10));
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = Pagination::new(Some(-3), Some(10_000));
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, MAX_PER_PAGE);

        let p = Pagination::new(Some(1), Some(0));
        assert_eq!(p.per_page, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::new(Some(1), Some(10));
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }

    #[test]
    fn slice_returns_rows_for_requested_page() {
        let rows: Vec<i32> = (1..=25).collect();
        let p = Pagination::new(Some(2), Some(10));
        assert_eq!(p.slice(&rows), (11..=20).collect::<Vec<_>>());

        let p = Pagination::new(Some(3), Some(10));
        assert_eq!(p.slice(&rows), (21..=25).collect::<Vec<_>>());

        let p = Pagination::new(Some(9), Some(10));
        assert!(p.slice(&rows).is_empty());
    }
}
