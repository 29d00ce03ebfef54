//! Store entity model and DTOs.

use kobonat_core::i18n::Localizable;
use kobonat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub name_en: String,
    pub slug: String,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub url: String,
    pub description: String,
    pub description_en: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub sort_order: i32,
    /// Only ever incremented.
    pub click_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub enum StoreField {
    Name,
    Description,
}

impl Localizable for Store {
    type Field = StoreField;

    fn field_pair(&self, field: StoreField) -> (&str, &str) {
        match field {
            StoreField::Name => (&self.name, &self.name_en),
            StoreField::Description => (&self.description, &self.description_en),
        }
    }
}

/// DTO for creating a new store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStore {
    pub name: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub url: String,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a store. `click_count` is not writable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStore {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
