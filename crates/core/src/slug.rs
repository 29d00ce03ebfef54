//! Slug rules for categories and stores.
//!
//! Slugs follow the same shape as a Unicode-aware web slug: letters and
//! digits from any script plus `-` and `_`, so Arabic slugs are allowed.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 100;

static SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-\w]+$").expect("valid slug regex"));

/// Validate a slug value.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !SLUG.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use letters, digits, hyphens or underscores"
        )));
    }
    Ok(())
}
