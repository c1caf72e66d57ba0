//! Page windows, navigation envelopes and the result ordering policy
//!
//! `window_of` and `envelope_of` trust their inputs: `page >= 1` and
//! `1 <= limit <= 100` are checked by [`PageRequest::new`] before a request
//! gets this far.

use crate::recipe::RecipeRecord;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Page must be a positive integer, got '{0}'")]
    InvalidPage(String),
    #[error("Limit must be between 1 and 100, got '{value}'")]
    InvalidLimit { value: String },
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub const MIN_LIMIT: u32 = 1;
    pub const MAX_LIMIT: u32 = 100;
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(page: u32, limit: u32) -> Result<Self, PageError> {
        if page < 1 {
            return Err(PageError::InvalidPage(page.to_string()));
        }
        if !(Self::MIN_LIMIT..=Self::MAX_LIMIT).contains(&limit) {
            return Err(PageError::InvalidLimit {
                value: limit.to_string(),
            });
        }
        Ok(Self { page, limit })
    }

    /// Validate raw `page`/`limit` strings; missing values take the defaults
    pub fn from_raw(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u32,
    ) -> Result<Self, PageError> {
        let page = match page {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| PageError::InvalidPage(raw.to_string()))?,
            None => 1,
        };
        let limit = match limit {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| PageError::InvalidLimit {
                    value: raw.to_string(),
                })?,
            None => default_limit,
        };
        Self::new(page, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Window {
        window_of(self.page, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Offset/count slice of a sorted result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub count: u64,
}

pub fn window_of(page: u32, limit: u32) -> Window {
    let limit = u64::from(limit);
    Window {
        offset: u64::from(page.saturating_sub(1)) * limit,
        count: limit,
    }
}

/// Navigation envelope for one page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

pub fn envelope_of(total: u64, page: u32, limit: u32) -> Pagination {
    let pages = total.div_ceil(u64::from(limit));
    Pagination {
        page,
        limit,
        total,
        pages,
        has_next: u64::from(page) < pages,
        has_prev: page > 1,
    }
}

/// One page of items together with its envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub recipes: Vec<T>,
    pub pagination: Pagination,
}

/// Total order applied to every result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Rating high to low (unrated last), then identity ascending
    #[default]
    RatingDescIdAsc,
}

impl SortKey {
    pub fn compare(&self, a: &RecipeRecord, b: &RecipeRecord) -> Ordering {
        match self {
            SortKey::RatingDescIdAsc => {
                compare_rating_desc(a.rating, b.rating).then_with(|| a.id.cmp(&b.id))
            }
        }
    }
}

fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
