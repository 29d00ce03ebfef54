//! Repository for `notifications` and `user_notifications`.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{
    CreateNotification, InboxEntry, Notification, NotificationWithStats, UpdateNotification,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, title_en, message, message_en, image, link, target_store_id, \
                       send_to_all, is_sent, sent_at, created_at, updated_at";

/// [`COLUMNS`] qualified with the `n` alias.
const N_COLUMNS: &str = "n.id, n.title, n.title_en, n.message, n.message_en, n.image, n.link, \
                         n.target_store_id, n.send_to_all, n.is_sent, n.sent_at, n.created_at, \
                         n.updated_at";

/// Provides authoring, delivery and read-state operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    // -----------------------------------------------------------------------
    // Authoring
    // -----------------------------------------------------------------------

    /// Insert a new, unsent notification.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (title, title_en, message, message_en, image, link,
                                        target_store_id, send_to_all)
             VALUES ($1, COALESCE($2, ''), $3, COALESCE($4, ''), $5, COALESCE($6, ''), $7,
                     COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.title_en)
            .bind(&input.message)
            .bind(&input.message_en)
            .bind(&input.image)
            .bind(&input.link)
            .bind(input.target_store_id)
            .bind(input.send_to_all)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Notifications with recipient and read counts derived from the
    /// per-user rows, newest first.
    pub async fn list_with_stats(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationWithStats>, sqlx::Error> {
        let query = format!(
            "SELECT {N_COLUMNS},
                    COUNT(un.id) AS recipient_count,
                    COUNT(un.id) FILTER (WHERE un.is_read) AS read_count
             FROM notifications n
             LEFT JOIN user_notifications un ON un.notification_id = n.id
             GROUP BY n.id
             ORDER BY n.created_at DESC, n.id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, NotificationWithStats>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update notification content. Delivery state is untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNotification,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET
                title = COALESCE($2, title),
                title_en = COALESCE($3, title_en),
                message = COALESCE($4, message),
                message_en = COALESCE($5, message_en),
                image = COALESCE($6, image),
                link = COALESCE($7, link),
                target_store_id = CASE WHEN $8 THEN NULL ELSE COALESCE($9, target_store_id) END,
                send_to_all = COALESCE($10, send_to_all)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.title_en)
            .bind(&input.message)
            .bind(&input.message_en)
            .bind(&input.image)
            .bind(&input.link)
            .bind(input.clear_target_store)
            .bind(input.target_store_id)
            .bind(input.send_to_all)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark the given notifications as sent. Already-sent rows keep their
    /// original `sent_at`. Returns how many rows changed state.
    pub async fn send(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_sent = true, sent_at = NOW()
             WHERE id = ANY($1) AND NOT is_sent",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Per-user delivery
    // -----------------------------------------------------------------------

    /// Create the user's missing delivery rows for every sent broadcast.
    ///
    /// Safe to run concurrently: the unique pair absorbs duplicates.
    /// Returns the number of rows created.
    pub async fn fan_out(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_notifications (user_id, notification_id)
             SELECT $1, n.id FROM notifications n
             WHERE n.is_sent AND n.send_to_all
             ON CONFLICT (user_id, notification_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// The user's delivery rows with content, newest first.
    pub async fn inbox(pool: &PgPool, user_id: DbId) -> Result<Vec<InboxEntry>, sqlx::Error> {
        let query = format!(
            "SELECT un.id AS user_notification_id, un.is_read, un.read_at,
                    un.created_at AS delivered_at, {N_COLUMNS}
             FROM user_notifications un
             JOIN notifications n ON n.id = un.notification_id
             WHERE un.user_id = $1
             ORDER BY un.created_at DESC, n.id DESC"
        );
        sqlx::query_as::<_, InboxEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark one of the user's delivery rows read. The first `read_at` wins.
    ///
    /// Returns `false` when the row does not exist or belongs to someone else.
    pub async fn mark_read(
        pool: &PgPool,
        user_id: DbId,
        user_notification_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_notifications
             SET is_read = true, read_at = COALESCE(read_at, NOW())
             WHERE id = $1 AND user_id = $2",
        )
        .bind(user_notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every unread row of the user read. Returns the count changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_notifications SET is_read = true, read_at = NOW()
             WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
