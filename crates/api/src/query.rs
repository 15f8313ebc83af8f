//! Shared query parameter types for API handlers.

use chapel_core::pagination::{clamp_limit, Pagination};
use serde::Deserialize;

/// Page-number pagination (`?page=&per_page=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PaginationParams {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// Event listing (`?page=&per_page=&category=`).
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
}

impl EventListParams {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }

    /// The category filter, ignoring blanks and `all`.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }
}

/// Short "top N" listings (`?limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    /// Clamp into `1..=max`, falling back to `default`.
    pub fn limit(&self, default: i64, max: i64) -> i64 {
        clamp_limit(self.limit, default, max)
    }
}

/// `?email=` lookup.
#[derive(Debug, Deserialize)]
pub struct EmailParams {
    pub email: Option<String>,
}
