//! Coupon entity model and DTOs.

use bigdecimal::BigDecimal;
use kobonat_core::i18n::{resolve, Lang, Localizable};
use kobonat_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `coupons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coupon {
    pub id: DbId,
    pub store_id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub title_en: String,
    pub code: String,
    pub discount_percentage: i32,
    pub discount_value: Option<BigDecimal>,
    pub description: String,
    pub description_en: String,
    pub image: Option<String>,
    pub affiliate_url: String,
    pub expiry_date: Option<Date>,
    pub is_active: bool,
    pub is_best_offer: bool,
    pub is_most_used: bool,
    pub is_exclusive: bool,
    pub is_verified: bool,
    pub used_count: i64,
    pub view_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub enum CouponField {
    Title,
    Description,
}

impl Localizable for Coupon {
    type Field = CouponField;

    fn field_pair(&self, field: CouponField) -> (&str, &str) {
        match field {
            CouponField::Title => (&self.title, &self.title_en),
            CouponField::Description => (&self.description, &self.description_en),
        }
    }
}

/// A coupon joined with the store it belongs to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CouponWithStore {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub coupon: Coupon,
    pub store_name: String,
    pub store_name_en: String,
    pub store_slug: String,
    pub store_logo: Option<String>,
    pub store_url: String,
}

impl CouponWithStore {
    pub fn store_display_name(&self, lang: Lang) -> &str {
        resolve(&self.store_name, &self.store_name_en, lang)
    }
}

/// DTO for creating a new coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCoupon {
    pub store_id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub title_en: Option<String>,
    pub code: String,
    pub discount_percentage: Option<i32>,
    pub discount_value: Option<BigDecimal>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub image: Option<String>,
    pub affiliate_url: Option<String>,
    pub expiry_date: Option<Date>,
    pub is_active: Option<bool>,
    pub is_best_offer: Option<bool>,
    pub is_most_used: Option<bool>,
    pub is_exclusive: Option<bool>,
    pub is_verified: Option<bool>,
}

/// DTO for updating a coupon. Counters are not writable.
///
/// `clear_category` detaches the coupon from its category; it wins over
/// `category_id` when both are given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCoupon {
    pub store_id: Option<DbId>,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub clear_category: bool,
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub code: Option<String>,
    pub discount_percentage: Option<i32>,
    pub discount_value: Option<BigDecimal>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub image: Option<String>,
    pub affiliate_url: Option<String>,
    pub expiry_date: Option<Date>,
    pub is_active: Option<bool>,
    pub is_best_offer: Option<bool>,
    pub is_most_used: Option<bool>,
    pub is_exclusive: Option<bool>,
    pub is_verified: Option<bool>,
}

/// Filters for the public coupon listing. Absent filters match everything.
#[derive(Debug, Clone, Default)]
pub struct CouponFilter<'a> {
    pub category_slug: Option<&'a str>,
    pub store_slug: Option<&'a str>,
    /// Substring matched against title, English title, code and store name.
    pub query: Option<&'a str>,
}
