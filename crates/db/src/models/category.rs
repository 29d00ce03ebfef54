//! Category entity model and DTOs.

use kobonat_core::i18n::Localizable;
use kobonat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub name_en: String,
    pub slug: String,
    pub icon: String,
    pub image: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub enum CategoryField {
    Name,
}

impl Localizable for Category {
    type Field = CategoryField;

    fn field_pair(&self, field: CategoryField) -> (&str, &str) {
        match field {
            CategoryField::Name => (&self.name, &self.name_en),
        }
    }
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
