//! Per-user profile, created together with the user.

use kobonat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub phone: String,
    pub avatar: Option<String>,
    pub preferred_language: String,
    pub receive_notifications: bool,
    pub receive_emails: bool,
    pub is_banned: bool,
    pub ban_reason: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating profile preferences. Ban state has its own methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub phone: Option<String>,
    pub preferred_language: Option<String>,
    pub receive_notifications: Option<bool>,
}
