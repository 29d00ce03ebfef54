//! Repository for the `user_profiles` table.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{UpdateProfile, UserProfile};

const COLUMNS: &str = "id, user_id, phone, avatar, preferred_language, receive_notifications, \
                       receive_emails, is_banned, ban_reason, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update preferences. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                phone = COALESCE($2, phone),
                preferred_language = COALESCE($3, preferred_language),
                receive_notifications = COALESCE($4, receive_notifications)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(&input.phone)
            .bind(&input.preferred_language)
            .bind(input.receive_notifications)
            .fetch_optional(pool)
            .await
    }

    /// Ban a user with a reason shown back to them on login.
    pub async fn ban(
        pool: &PgPool,
        user_id: DbId,
        reason: &str,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET is_banned = true, ban_reason = $2
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Lift a ban and clear its reason.
    pub async fn unban(pool: &PgPool, user_id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET is_banned = false, ban_reason = ''
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
