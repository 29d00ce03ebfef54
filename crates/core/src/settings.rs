//! Site settings singleton: fixed identity, defaults, and field rules.
//!
//! The database column defaults mirror the constants here; the constants
//! are what the setup wizard writes back explicitly.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// The only primary key the `app_settings` table accepts.
pub const SETTINGS_ID: i64 = 1;

pub const DEFAULT_APP_NAME: &str = "كوبونات";
pub const DEFAULT_APP_NAME_EN: &str = "Coupons";
pub const DEFAULT_PRIMARY_COLOR: &str = "#27ae60";
pub const DEFAULT_SECONDARY_COLOR: &str = "#2c3e50";
pub const DEFAULT_ACCENT_COLOR: &str = "#f39c12";
pub const DEFAULT_COUPONS_PER_PAGE: i32 = 12;
pub const DEFAULT_STORES_PER_PAGE: i32 = 16;
pub const DEFAULT_MAINTENANCE_MESSAGE: &str = "الموقع تحت الصيانة، سنعود قريباً";

/// Upper bound for any configurable page size.
pub const MAX_PAGE_SIZE: i32 = 100;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

/// Validate a `#RRGGBB` color value.
pub fn validate_hex_color(field: &str, value: &str) -> Result<(), CoreError> {
    if !HEX_COLOR.is_match(value) {
        return Err(CoreError::Validation(format!(
            "{field} must be a hex color like #27ae60, got '{value}'"
        )));
    }
    Ok(())
}

/// Validate a per-page setting.
pub fn validate_page_size(field: &str, value: i32) -> Result<(), CoreError> {
    if !(1..=MAX_PAGE_SIZE).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{field} must be between 1 and {MAX_PAGE_SIZE}, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for color in [
            DEFAULT_PRIMARY_COLOR,
            DEFAULT_SECONDARY_COLOR,
            DEFAULT_ACCENT_COLOR,
        ] {
            assert!(validate_hex_color("color", color).is_ok());
        }
        assert!(validate_page_size("coupons_per_page", DEFAULT_COUPONS_PER_PAGE).is_ok());
        assert!(validate_page_size("stores_per_page", DEFAULT_STORES_PER_PAGE).is_ok());
    }

    #[test]
    fn malformed_colors_rejected() {
        assert!(validate_hex_color("primary_color", "27ae60").is_err());
        assert!(validate_hex_color("primary_color", "#27ae6").is_err());
        assert!(validate_hex_color("primary_color", "#27ae6g").is_err());
        assert!(validate_hex_color("primary_color", "#27AE60").is_ok());
    }

    #[test]
    fn page_size_bounds() {
        assert!(validate_page_size("stores_per_page", 0).is_err());
        assert!(validate_page_size("stores_per_page", 1).is_ok());
        assert!(validate_page_size("stores_per_page", MAX_PAGE_SIZE).is_ok());
        assert!(validate_page_size("stores_per_page", MAX_PAGE_SIZE + 1).is_err());
    }
}
