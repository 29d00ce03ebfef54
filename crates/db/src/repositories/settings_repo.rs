//! Repository for the `app_settings` singleton.
//!
//! No method takes an id: every read and write targets the one row.

use kobonat_core::settings::SETTINGS_ID;
use sqlx::PgPool;

use crate::models::settings::{AppSettings, UpdateSettings};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, app_name, app_name_en, app_logo, favicon, app_description, \
                       app_description_en, primary_color, secondary_color, accent_color, \
                       default_language, enable_english, facebook_url, twitter_url, \
                       instagram_url, tiktok_url, youtube_url, whatsapp_number, contact_email, \
                       contact_phone, about_text, about_text_en, privacy_policy, \
                       privacy_policy_en, terms_conditions, terms_conditions_en, \
                       coupons_per_page, stores_per_page, enable_registration, \
                       enable_favorites, enable_notifications, maintenance_mode, \
                       maintenance_message, play_store_url, app_store_url, created_at, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    /// Return the settings row, creating it with column defaults if absent.
    ///
    /// Concurrent first calls race on the primary key; the losers' inserts
    /// are no-ops and every caller reads the same row.
    pub async fn get_or_create(pool: &PgPool) -> Result<AppSettings, sqlx::Error> {
        sqlx::query("INSERT INTO app_settings (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(SETTINGS_ID)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM app_settings WHERE id = $1");
        sqlx::query_as::<_, AppSettings>(&query)
            .bind(SETTINGS_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply a patch to the settings row, creating it first if needed.
    pub async fn update(pool: &PgPool, input: &UpdateSettings) -> Result<AppSettings, sqlx::Error> {
        Self::get_or_create(pool).await?;

        let query = format!(
            "UPDATE app_settings SET
                app_name = COALESCE($2, app_name),
                app_name_en = COALESCE($3, app_name_en),
                app_logo = COALESCE($4, app_logo),
                favicon = COALESCE($5, favicon),
                app_description = COALESCE($6, app_description),
                app_description_en = COALESCE($7, app_description_en),
                primary_color = COALESCE($8, primary_color),
                secondary_color = COALESCE($9, secondary_color),
                accent_color = COALESCE($10, accent_color),
                default_language = COALESCE($11, default_language),
                enable_english = COALESCE($12, enable_english),
                facebook_url = COALESCE($13, facebook_url),
                twitter_url = COALESCE($14, twitter_url),
                instagram_url = COALESCE($15, instagram_url),
                tiktok_url = COALESCE($16, tiktok_url),
                youtube_url = COALESCE($17, youtube_url),
                whatsapp_number = COALESCE($18, whatsapp_number),
                contact_email = COALESCE($19, contact_email),
                contact_phone = COALESCE($20, contact_phone),
                about_text = COALESCE($21, about_text),
                about_text_en = COALESCE($22, about_text_en),
                privacy_policy = COALESCE($23, privacy_policy),
                privacy_policy_en = COALESCE($24, privacy_policy_en),
                terms_conditions = COALESCE($25, terms_conditions),
                terms_conditions_en = COALESCE($26, terms_conditions_en),
                coupons_per_page = COALESCE($27, coupons_per_page),
                stores_per_page = COALESCE($28, stores_per_page),
                enable_registration = COALESCE($29, enable_registration),
                enable_favorites = COALESCE($30, enable_favorites),
                enable_notifications = COALESCE($31, enable_notifications),
                maintenance_mode = COALESCE($32, maintenance_mode),
                maintenance_message = COALESCE($33, maintenance_message),
                play_store_url = COALESCE($34, play_store_url),
                app_store_url = COALESCE($35, app_store_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppSettings>(&query)
            .bind(SETTINGS_ID)
            .bind(&input.app_name)
            .bind(&input.app_name_en)
            .bind(&input.app_logo)
            .bind(&input.favicon)
            .bind(&input.app_description)
            .bind(&input.app_description_en)
            .bind(&input.primary_color)
            .bind(&input.secondary_color)
            .bind(&input.accent_color)
            .bind(&input.default_language)
            .bind(input.enable_english)
            .bind(&input.facebook_url)
            .bind(&input.twitter_url)
            .bind(&input.instagram_url)
            .bind(&input.tiktok_url)
            .bind(&input.youtube_url)
            .bind(&input.whatsapp_number)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.about_text)
            .bind(&input.about_text_en)
            .bind(&input.privacy_policy)
            .bind(&input.privacy_policy_en)
            .bind(&input.terms_conditions)
            .bind(&input.terms_conditions_en)
            .bind(input.coupons_per_page)
            .bind(input.stores_per_page)
            .bind(input.enable_registration)
            .bind(input.enable_favorites)
            .bind(input.enable_notifications)
            .bind(input.maintenance_mode)
            .bind(&input.maintenance_message)
            .bind(&input.play_store_url)
            .bind(&input.app_store_url)
            .fetch_one(pool)
            .await
    }
}
