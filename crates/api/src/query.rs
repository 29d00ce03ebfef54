//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Back-office pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `clamp_limit` / `clamp_offset` before use.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        use kobonat_core::search::{clamp_limit, DEFAULT_ADMIN_LIMIT, MAX_ADMIN_LIMIT};
        clamp_limit(self.limit, DEFAULT_ADMIN_LIMIT, MAX_ADMIN_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        kobonat_core::search::clamp_offset(self.offset)
    }
}

/// Public page-number pagination (`?page=`). Kept as a raw string so a
/// malformed value falls back to the first page instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// `?q=` search parameter.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Public listing filters (`?q=&page=&category=&store=`).
///
/// Every field is optional; unknown slugs simply match nothing.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub category: Option<String>,
    pub store: Option<String>,
}
