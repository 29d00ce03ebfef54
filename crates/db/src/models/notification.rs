//! Notifications and their per-user delivery records.
//!
//! A notification is authored once; a `user_notifications` row is created
//! for a given user the first time that user lists their notifications.
//! Read state lives only on the per-user row.

use kobonat_core::i18n::Localizable;
use kobonat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub title_en: String,
    pub message: String,
    pub message_en: String,
    pub image: Option<String>,
    pub link: String,
    pub target_store_id: Option<DbId>,
    pub send_to_all: bool,
    pub is_sent: bool,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub enum NotificationField {
    Title,
    Message,
}

impl Localizable for Notification {
    type Field = NotificationField;

    fn field_pair(&self, field: NotificationField) -> (&str, &str) {
        match field {
            NotificationField::Title => (&self.title, &self.title_en),
            NotificationField::Message => (&self.message, &self.message_en),
        }
    }
}

/// Back-office view of a notification with derived delivery counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub notification: Notification,
    pub recipient_count: i64,
    pub read_count: i64,
}

/// A row from the `user_notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserNotification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_id: DbId,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's delivery record joined with the notification content.
#[derive(Debug, Clone, FromRow)]
pub struct InboxEntry {
    pub user_notification_id: DbId,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub delivered_at: Timestamp,
    #[sqlx(flatten)]
    pub notification: Notification,
}

/// DTO for creating a notification. New notifications are unsent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub title: String,
    pub title_en: Option<String>,
    pub message: String,
    pub message_en: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub target_store_id: Option<DbId>,
    pub send_to_all: Option<bool>,
}

/// DTO for updating notification content. Delivery state is not writable.
///
/// `clear_target_store` drops the store target; it wins over
/// `target_store_id` when both are given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotification {
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub message: Option<String>,
    pub message_en: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub target_store_id: Option<DbId>,
    #[serde(default)]
    pub clear_target_store: bool,
    pub send_to_all: Option<bool>,
}
