//! Localized read models for the public site.
//!
//! Each view resolves the bilingual fields of a stored row for one
//! language, so the JSON a page receives never carries both variants.

use bigdecimal::BigDecimal;
use kobonat_core::coupon::{days_until_expiry, is_expired, redirect_url};
use kobonat_core::i18n::{Lang, Localizable};
use kobonat_core::types::{Date, DbId, Timestamp};
use kobonat_db::models::category::{Category, CategoryField};
use kobonat_db::models::coupon::{CouponField, CouponWithStore};
use kobonat_db::models::favorite::FavoriteEntry;
use kobonat_db::models::notification::{InboxEntry, NotificationField};
use kobonat_db::models::settings::{AppSettings, SettingsField};
use kobonat_db::models::slider::{SliderField, SliderItem};
use kobonat_db::models::store::{Store, StoreField};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub image: Option<String>,
}

impl CategoryView {
    pub fn new(category: &Category, lang: Lang) -> Self {
        Self {
            id: category.id,
            name: category.localized_string(CategoryField::Name, lang),
            slug: category.slug.clone(),
            icon: category.icon.clone(),
            image: category.image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreView {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub url: String,
    pub is_featured: bool,
    pub click_count: i64,
}

impl StoreView {
    pub fn new(store: &Store, lang: Lang) -> Self {
        Self {
            id: store.id,
            name: store.localized_string(StoreField::Name, lang),
            description: store.localized_string(StoreField::Description, lang),
            slug: store.slug.clone(),
            logo: store.logo.clone(),
            cover_image: store.cover_image.clone(),
            url: store.url.clone(),
            is_featured: store.is_featured,
            click_count: store.click_count,
        }
    }
}

/// The owning store as shown on a coupon card.
#[derive(Debug, Serialize)]
pub struct CouponStoreView {
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CouponView {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub code: String,
    pub discount_percentage: i32,
    pub discount_value: Option<BigDecimal>,
    pub image: Option<String>,
    pub expiry_date: Option<Date>,
    pub is_expired: bool,
    pub days_until_expiry: Option<i64>,
    pub is_best_offer: bool,
    pub is_most_used: bool,
    pub is_exclusive: bool,
    pub is_verified: bool,
    pub used_count: i64,
    pub redirect_url: String,
    pub store: CouponStoreView,
}

impl CouponView {
    /// `today` is the current UTC date; expiry is judged against it.
    pub fn new(row: &CouponWithStore, lang: Lang, today: Date) -> Self {
        let coupon = &row.coupon;
        Self {
            id: coupon.id,
            title: coupon.localized_string(CouponField::Title, lang),
            description: coupon.localized_string(CouponField::Description, lang),
            code: coupon.code.clone(),
            discount_percentage: coupon.discount_percentage,
            discount_value: coupon.discount_value.clone(),
            image: coupon.image.clone(),
            expiry_date: coupon.expiry_date,
            is_expired: is_expired(coupon.expiry_date, today),
            days_until_expiry: days_until_expiry(coupon.expiry_date, today),
            is_best_offer: coupon.is_best_offer,
            is_most_used: coupon.is_most_used,
            is_exclusive: coupon.is_exclusive,
            is_verified: coupon.is_verified,
            used_count: coupon.used_count,
            redirect_url: redirect_url(&coupon.affiliate_url, &row.store_url).to_string(),
            store: CouponStoreView {
                name: row.store_display_name(lang).to_string(),
                slug: row.store_slug.clone(),
                logo: row.store_logo.clone(),
            },
        }
    }

    pub fn list(rows: &[CouponWithStore], lang: Lang, today: Date) -> Vec<Self> {
        rows.iter().map(|row| Self::new(row, lang, today)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct SliderView {
    pub id: DbId,
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub image: Option<String>,
    pub link: String,
}

impl SliderView {
    pub fn new(item: &SliderItem, lang: Lang) -> Self {
        Self {
            id: item.id,
            title: item.localized_string(SliderField::Title, lang),
            subtitle: item.localized_string(SliderField::Subtitle, lang),
            button_text: item.localized_string(SliderField::ButtonText, lang),
            image: item.image.clone(),
            link: item.link.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-user
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FavoriteView {
    pub id: DbId,
    pub created_at: Timestamp,
    /// Favorites keep pointing at coupons that were deactivated later.
    pub is_available: bool,
    pub coupon: CouponView,
}

impl FavoriteView {
    pub fn new(entry: &FavoriteEntry, lang: Lang, today: Date) -> Self {
        Self {
            id: entry.favorite_id,
            created_at: entry.favorited_at,
            is_available: entry.coupon.coupon.is_active,
            coupon: CouponView::new(&entry.coupon, lang, today),
        }
    }
}

/// One row of a user's notification inbox.
#[derive(Debug, Serialize)]
pub struct InboxView {
    /// Id of the per-user record; this is what mark-read takes.
    pub id: DbId,
    pub notification_id: DbId,
    pub title: String,
    pub message: String,
    pub image: Option<String>,
    pub link: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl InboxView {
    pub fn new(entry: &InboxEntry, lang: Lang) -> Self {
        let n = &entry.notification;
        Self {
            id: entry.user_notification_id,
            notification_id: n.id,
            title: n.localized_string(NotificationField::Title, lang),
            message: n.localized_string(NotificationField::Message, lang),
            image: n.image.clone(),
            link: n.link.clone(),
            is_read: entry.is_read,
            read_at: entry.read_at,
            created_at: entry.delivered_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub tiktok: String,
    pub youtube: String,
    pub whatsapp: String,
}

/// Branding and feature switches every page needs.
#[derive(Debug, Serialize)]
pub struct SiteView {
    pub lang: Lang,
    pub dir: &'static str,
    pub app_name: String,
    pub app_description: String,
    pub app_logo: Option<String>,
    pub favicon: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub enable_english: bool,
    pub enable_registration: bool,
    pub enable_favorites: bool,
    pub enable_notifications: bool,
    pub social: SocialLinks,
    pub play_store_url: String,
    pub app_store_url: String,
}

impl SiteView {
    pub fn new(settings: &AppSettings, lang: Lang) -> Self {
        Self {
            lang,
            dir: if lang.is_rtl() { "rtl" } else { "ltr" },
            app_name: settings.localized_string(SettingsField::AppName, lang),
            app_description: settings.localized_string(SettingsField::AppDescription, lang),
            app_logo: settings.app_logo.clone(),
            favicon: settings.favicon.clone(),
            primary_color: settings.primary_color.clone(),
            secondary_color: settings.secondary_color.clone(),
            accent_color: settings.accent_color.clone(),
            enable_english: settings.enable_english,
            enable_registration: settings.enable_registration,
            enable_favorites: settings.enable_favorites,
            enable_notifications: settings.enable_notifications,
            social: SocialLinks {
                facebook: settings.facebook_url.clone(),
                twitter: settings.twitter_url.clone(),
                instagram: settings.instagram_url.clone(),
                tiktok: settings.tiktok_url.clone(),
                youtube: settings.youtube_url.clone(),
                whatsapp: settings.whatsapp_number.clone(),
            },
            play_store_url: settings.play_store_url.clone(),
            app_store_url: settings.app_store_url.clone(),
        }
    }
}

/// Current UTC date used for expiry flags.
pub fn today() -> Date {
    chrono::Utc::now().date_naive()
}
