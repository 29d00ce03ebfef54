//! Home page slider items.

use kobonat_core::i18n::Localizable;
use kobonat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `slider_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SliderItem {
    pub id: DbId,
    pub title: String,
    pub title_en: String,
    pub subtitle: String,
    pub subtitle_en: String,
    pub image: Option<String>,
    pub link: String,
    pub button_text: String,
    pub button_text_en: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub click_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub enum SliderField {
    Title,
    Subtitle,
    ButtonText,
}

impl Localizable for SliderItem {
    type Field = SliderField;

    fn field_pair(&self, field: SliderField) -> (&str, &str) {
        match field {
            SliderField::Title => (&self.title, &self.title_en),
            SliderField::Subtitle => (&self.subtitle, &self.subtitle_en),
            SliderField::ButtonText => (&self.button_text, &self.button_text_en),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSliderItem {
    pub title: String,
    pub title_en: Option<String>,
    pub subtitle: Option<String>,
    pub subtitle_en: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub button_text_en: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSliderItem {
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub subtitle: Option<String>,
    pub subtitle_en: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub button_text_en: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
