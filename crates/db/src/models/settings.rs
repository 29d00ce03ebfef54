//! The site settings singleton.

use kobonat_core::error::CoreError;
use kobonat_core::i18n::{Lang, Localizable};
use kobonat_core::settings::{validate_hex_color, validate_page_size};
use kobonat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `app_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppSettings {
    pub id: DbId,
    pub app_name: String,
    pub app_name_en: String,
    pub app_logo: Option<String>,
    pub favicon: Option<String>,
    pub app_description: String,
    pub app_description_en: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub default_language: String,
    pub enable_english: bool,
    pub facebook_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub tiktok_url: String,
    pub youtube_url: String,
    pub whatsapp_number: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub about_text: String,
    pub about_text_en: String,
    pub privacy_policy: String,
    pub privacy_policy_en: String,
    pub terms_conditions: String,
    pub terms_conditions_en: String,
    pub coupons_per_page: i32,
    pub stores_per_page: i32,
    pub enable_registration: bool,
    pub enable_favorites: bool,
    pub enable_notifications: bool,
    pub maintenance_mode: bool,
    pub maintenance_message: String,
    pub play_store_url: String,
    pub app_store_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub enum SettingsField {
    AppName,
    AppDescription,
    About,
    Privacy,
    Terms,
}

impl Localizable for AppSettings {
    type Field = SettingsField;

    fn field_pair(&self, field: SettingsField) -> (&str, &str) {
        match field {
            SettingsField::AppName => (&self.app_name, &self.app_name_en),
            SettingsField::AppDescription => (&self.app_description, &self.app_description_en),
            SettingsField::About => (&self.about_text, &self.about_text_en),
            SettingsField::Privacy => (&self.privacy_policy, &self.privacy_policy_en),
            SettingsField::Terms => (&self.terms_conditions, &self.terms_conditions_en),
        }
    }
}

impl AppSettings {
    /// Language for a visitor whose cookie says `preferred`.
    ///
    /// With English disabled everyone reads Arabic.
    pub fn effective_language(&self, preferred: Option<Lang>) -> Lang {
        if !self.enable_english {
            return Lang::Ar;
        }
        preferred
            .or_else(|| Lang::from_code(&self.default_language))
            .unwrap_or_default()
    }
}

/// Patch for the settings row. There is no id: the only row is updated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettings {
    pub app_name: Option<String>,
    pub app_name_en: Option<String>,
    pub app_logo: Option<String>,
    pub favicon: Option<String>,
    pub app_description: Option<String>,
    pub app_description_en: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub default_language: Option<String>,
    pub enable_english: Option<bool>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    pub whatsapp_number: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub about_text: Option<String>,
    pub about_text_en: Option<String>,
    pub privacy_policy: Option<String>,
    pub privacy_policy_en: Option<String>,
    pub terms_conditions: Option<String>,
    pub terms_conditions_en: Option<String>,
    pub coupons_per_page: Option<i32>,
    pub stores_per_page: Option<i32>,
    pub enable_registration: Option<bool>,
    pub enable_favorites: Option<bool>,
    pub enable_notifications: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub maintenance_message: Option<String>,
    pub play_store_url: Option<String>,
    pub app_store_url: Option<String>,
}

impl UpdateSettings {
    /// Check the fields that carry format rules.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
            ("accent_color", &self.accent_color),
        ] {
            if let Some(value) = value {
                validate_hex_color(field, value)?;
            }
        }
        if let Some(code) = &self.default_language {
            Lang::parse(code)?;
        }
        if let Some(n) = self.coupons_per_page {
            validate_page_size("coupons_per_page", n)?;
        }
        if let Some(n) = self.stores_per_page {
            validate_page_size("stores_per_page", n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_valid() {
        assert!(UpdateSettings::default().validate().is_ok());
    }

    #[test]
    fn bad_color_rejected() {
        let patch = UpdateSettings {
            accent_color: Some("orange".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn bad_language_and_page_size_rejected() {
        let lang = UpdateSettings {
            default_language: Some("fr".into()),
            ..Default::default()
        };
        assert!(lang.validate().is_err());

        let size = UpdateSettings {
            stores_per_page: Some(0),
            ..Default::default()
        };
        assert!(size.validate().is_err());
    }
}
