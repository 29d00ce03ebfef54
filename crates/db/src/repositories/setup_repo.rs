//! First-run setup: detection and the one-shot wizard transaction.

use kobonat_core::roles::ROLE_ADMIN_ID;
use kobonat_core::settings::{
    DEFAULT_ACCENT_COLOR, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, SETTINGS_ID,
};
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};
use crate::repositories::UserRepo;

/// Advisory lock key serializing concurrent wizard submissions.
const SETUP_LOCK_KEY: i64 = 0x6b6f_626f_6e61_74;

/// Everything the wizard persists.
#[derive(Debug, Clone)]
pub struct CompleteSetup {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub app_name: String,
    pub app_name_en: String,
}

pub struct SetupRepo;

impl SetupRepo {
    /// Whether an administrator account exists.
    pub async fn is_initialized(pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE role_id = $1)")
            .bind(ROLE_ADMIN_ID)
            .fetch_one(pool)
            .await
    }

    /// Create the first administrator and write the initial settings.
    ///
    /// Runs under a transaction-scoped advisory lock and re-checks for an
    /// existing administrator once the lock is held. Returns `None` when
    /// another submission already completed setup; nothing is written then.
    pub async fn complete(pool: &PgPool, input: &CompleteSetup) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SETUP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let initialized = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE role_id = $1)",
        )
        .bind(ROLE_ADMIN_ID)
        .fetch_one(&mut *tx)
        .await?;
        if initialized {
            return Ok(None);
        }

        let user = UserRepo::create_with_profile_in(
            &mut tx,
            &CreateUser {
                username: input.username.clone(),
                email: input.email.clone(),
                password_hash: input.password_hash.clone(),
                role_id: ROLE_ADMIN_ID,
            },
            None,
        )
        .await?;

        sqlx::query(
            "INSERT INTO app_settings (id, app_name, app_name_en, primary_color, secondary_color,
                                       accent_color, enable_english, enable_registration,
                                       enable_favorites, enable_notifications)
             VALUES ($1, $2, $3, $4, $5, $6, true, true, true, true)
             ON CONFLICT (id) DO UPDATE SET
                app_name = EXCLUDED.app_name,
                app_name_en = EXCLUDED.app_name_en,
                primary_color = EXCLUDED.primary_color,
                secondary_color = EXCLUDED.secondary_color,
                accent_color = EXCLUDED.accent_color,
                enable_english = true,
                enable_registration = true,
                enable_favorites = true,
                enable_notifications = true",
        )
        .bind(SETTINGS_ID)
        .bind(&input.app_name)
        .bind(&input.app_name_en)
        .bind(DEFAULT_PRIMARY_COLOR)
        .bind(DEFAULT_SECONDARY_COLOR)
        .bind(DEFAULT_ACCENT_COLOR)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(user_id = user.id, username = %user.username, "First-run setup completed");
        Ok(Some(user))
    }
}
