//! Coupon rules that do not need the database.

use crate::error::CoreError;
use crate::types::Date;

/// Highest accepted discount percentage.
pub const MAX_DISCOUNT_PERCENTAGE: i32 = 100;

/// A coupon with an expiry date strictly before `today` is expired.
/// Coupons without an expiry date never expire.
pub fn is_expired(expiry_date: Option<Date>, today: Date) -> bool {
    expiry_date.is_some_and(|d| d < today)
}

/// Whole days from `today` until expiry; negative once expired.
pub fn days_until_expiry(expiry_date: Option<Date>, today: Date) -> Option<i64> {
    expiry_date.map(|d| (d - today).num_days())
}

/// Where "copy and shop" sends the visitor: the affiliate link when set,
/// otherwise the store's own URL.
pub fn redirect_url<'a>(affiliate_url: &'a str, store_url: &'a str) -> &'a str {
    if affiliate_url.is_empty() {
        store_url
    } else {
        affiliate_url
    }
}

pub fn validate_discount_percentage(value: i32) -> Result<(), CoreError> {
    if !(0..=MAX_DISCOUNT_PERCENTAGE).contains(&value) {
        return Err(CoreError::Validation(format!(
            "discount_percentage must be between 0 and {MAX_DISCOUNT_PERCENTAGE}, got {value}"
        )));
    }
    Ok(())
}
