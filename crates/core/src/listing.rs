//! Page, sort, and filter normalization for product listings.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number accepted. Anything above is clamped.
pub const MAX_PAGE: i64 = 1_000_000;

/// Category filter value meaning "no filter".
pub const CATEGORY_ALL: &str = "all";

/// Default category for products created without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Sortable product columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
    Title,
}

impl SortField {
    /// Column name, safe to interpolate into SQL.
    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Price => "price",
            SortField::Title => "title",
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            "price" => Ok(SortField::Price),
            "title" => Ok(SortField::Title),
            other => Err(CoreError::Validation(format!(
                "Cannot sort by '{other}'. Must be one of: created_at, price, title"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CoreError::Validation(format!(
                "Invalid order '{other}'. Must be asc or desc"
            ))),
        }
    }
}

/// A clamped page request: `1 <= page <= MAX_PAGE`, `1 <= limit <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned alongside a page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_products: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = total.saturating_add(request.limit - 1) / request.limit;
        Self {
            current_page: request.page,
            total_pages,
            total_products: total,
            has_next: request.page.saturating_mul(request.limit) < total,
            has_prev: request.page > 1,
        }
    }
}

/// Treat empty and `all` category filters as no filter.
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    match category.map(str::trim) {
        None | Some("") | Some(CATEGORY_ALL) => None,
        Some(c) => Some(c.to_string()),
    }
}

/// Trim a search term; blank terms mean no search.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
