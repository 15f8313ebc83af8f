//! Sermon listing: filter normalization, sorting and in-memory evaluation.
//!
//! The PostgreSQL repository translates a [`SermonQuery`] into SQL; the
//! in-memory repository evaluates it directly with [`SermonQuery::matches`]
//! and [`SermonQuery::compare`]. Both must agree, so the rules live here.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::pagination::Pagination;
use crate::types::{DbId, Timestamp};

/// Topic value the public filter UI sends for "no topic filter".
pub const TOPIC_ALL: &str = "all";

/// Column a sermon listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SermonSort {
    #[default]
    Date,
    Title,
    Views,
}

impl SermonSort {
    /// Parse a user-supplied sort key. Unknown keys fall back to `Date`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("title") => Self::Title,
            Some("views") => Self::Views,
            _ => Self::Date,
        }
    }
}

/// Sort direction. Unknown values fall back to `Desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Raw query-string parameters for sermon listing (`?search=&speaker=&…`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SermonListParams {
    pub search: Option<String>,
    pub speaker: Option<String>,
    pub series: Option<String>,
    pub topic: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Read access to the sermon fields the listing rules look at.
pub trait SermonRecord {
    fn id(&self) -> DbId;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn speaker(&self) -> &str;
    fn series(&self) -> Option<&str>;
    fn tags(&self) -> &[String];
    fn date(&self) -> Timestamp;
    fn view_count(&self) -> i64;
    fn is_published(&self) -> bool;
}

/// A normalized sermon listing request.
///
/// Empty filters are dropped rather than rejected, so a filter that matches
/// nothing simply yields an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SermonQuery {
    pub search: Option<String>,
    pub speaker: Option<String>,
    pub series: Option<String>,
    pub topic: Option<String>,
    pub sort: SermonSort,
    pub order: SortOrder,
    pub pagination: Pagination,
    /// Admin listings also see drafts.
    pub include_drafts: bool,
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

impl SermonQuery {
    pub fn from_params(params: &SermonListParams) -> Self {
        Self {
            search: non_empty(params.search.as_deref()),
            speaker: non_empty(params.speaker.as_deref()),
            series: non_empty(params.series.as_deref()),
            topic: non_empty(params.topic.as_deref())
                .filter(|t| !t.eq_ignore_ascii_case(TOPIC_ALL)),
            sort: SermonSort::parse(params.sort.as_deref()),
            order: SortOrder::parse(params.order.as_deref()),
            pagination: Pagination::new(params.page, params.per_page),
            include_drafts: false,
        }
    }

    pub fn with_drafts(mut self) -> Self {
        self.include_drafts = true;
        self
    }

    /// `ILIKE` pattern for the search filter, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }

    /// Whether `sermon` passes every active filter.
    pub fn matches<S: SermonRecord>(&self, sermon: &S) -> bool {
        if !self.include_drafts && !sermon.is_published() {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !sermon.title().to_lowercase().contains(&needle)
                && !sermon.description().to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(speaker) = &self.speaker {
            if sermon.speaker() != speaker {
                return false;
            }
        }
        if let Some(series) = &self.series {
            if sermon.series() != Some(series.as_str()) {
                return false;
            }
        }
        if let Some(topic) = &self.topic {
            if !sermon.tags().iter().any(|t| t == topic) {
                return false;
            }
        }
        true
    }

    /// Ordering for the requested sort. Ties are broken by id in the same
    /// direction so pages never overlap.
    pub fn compare<S: SermonRecord>(&self, a: &S, b: &S) -> Ordering {
        let primary = match self.sort {
            SermonSort::Date => a.date().cmp(&b.date()),
            SermonSort::Title => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
            SermonSort::Views => a.view_count().cmp(&b.view_count()),
        };
        self.order.apply(primary.then_with(|| a.id().cmp(&b.id())))
    }
}

/// Turn a free-text search into a literal substring `ILIKE` pattern.
///
/// `%`, `_` and `\` are escaped so user input never acts as a wildcard.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
