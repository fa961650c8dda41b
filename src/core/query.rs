//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

/// Records per page when the client does not ask for a page size
pub const DEFAULT_RECORDS_PER_PAGE: usize = 10;

/// Pagination parameters for list endpoints
///
/// Parameters are accepted as raw strings so that malformed values fall back
/// to their defaults instead of rejecting the request.
///
/// # Example
/// ```rust,ignore
/// // GET /foods?recordPerPage=5&page=2
/// // GET /foods?recordPerPage=5&startIndex=3
/// let window = params.window();
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// Number of records per page (defaults to 10, minimum 1)
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Explicit offset, overriding the one computed from `page`
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

impl PageParams {
    /// Get the page size, falling back to the default on missing or invalid input
    pub fn record_per_page(&self) -> usize {
        parse_positive(self.record_per_page.as_deref()).unwrap_or(DEFAULT_RECORDS_PER_PAGE)
    }

    /// Get the page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(1)
    }

    /// Resolve the slice of the collection to return
    pub fn window(&self) -> PageWindow {
        let limit = self.record_per_page();
        let offset = self
            .start_index
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or_else(|| self.page().saturating_sub(1).saturating_mul(limit));

        PageWindow { offset, limit }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

/// Offset and length of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    /// Cut the page out of a full listing
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

/// A page of foods together with the size of the whole collection
#[derive(Debug, Serialize)]
pub struct FoodPage<T> {
    pub total_count: usize,
    pub food_items: Vec<T>,
}

/// A page of users together with the size of the whole collection
#[derive(Debug, Serialize)]
pub struct UserPage<T> {
    pub total_count: usize,
    pub user_items: Vec<T>,
}
