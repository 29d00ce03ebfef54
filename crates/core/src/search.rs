//! Listing sizes and text-search helpers shared by the catalog endpoints.

/// Number of items in each homepage section.
pub const HOME_SECTION_LIMIT: i64 = 8;

/// Number of slides on the homepage.
pub const HOME_SLIDER_LIMIT: i64 = 5;

/// Full search page result caps.
pub const SEARCH_COUPON_LIMIT: i64 = 20;
pub const SEARCH_STORE_LIMIT: i64 = 10;

/// Typeahead (`/api/search/`) result caps.
pub const TYPEAHEAD_COUPON_LIMIT: i64 = 5;
pub const TYPEAHEAD_STORE_LIMIT: i64 = 3;

/// Typeahead queries shorter than this return nothing.
pub const TYPEAHEAD_MIN_CHARS: usize = 2;

/// Default and maximum page sizes for back-office listings.
pub const DEFAULT_ADMIN_LIMIT: i64 = 50;
pub const MAX_ADMIN_LIMIT: i64 = 200;

/// Trim a raw query; `None` when nothing is left.
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|q| !q.is_empty())
}

/// Whether a typeahead query is long enough to run.
pub fn is_typeahead_query(query: &str) -> bool {
    query.chars().count() >= TYPEAHEAD_MIN_CHARS
}

/// Build an `ILIKE` substring pattern, escaping the wildcard characters.
pub fn contains_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Clamp a `limit` parameter to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an `offset` parameter to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
