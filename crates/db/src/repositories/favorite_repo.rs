//! Repository for the `favorites` table.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::{FavoriteEntry, ToggleOutcome};

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Add the pair if absent, otherwise remove it.
    ///
    /// The insert is conflict-tolerant, so two concurrent toggles never
    /// produce a duplicate pair.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        coupon_id: DbId,
    ) -> Result<ToggleOutcome, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO favorites (user_id, coupon_id) VALUES ($1, $2)
             ON CONFLICT (user_id, coupon_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(coupon_id)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            return Ok(ToggleOutcome::Added);
        }

        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND coupon_id = $2")
            .bind(user_id)
            .bind(coupon_id)
            .execute(pool)
            .await?;
        Ok(ToggleOutcome::Removed)
    }

    /// Coupon ids the user has favorited.
    pub async fn coupon_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT coupon_id FROM favorites WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// The user's favorites with coupon and store, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FavoriteEntry>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteEntry>(
            "SELECT f.id AS favorite_id, f.created_at AS favorited_at,
                    c.id, c.store_id, c.category_id, c.title, c.title_en, c.code,
                    c.discount_percentage, c.discount_value, c.description, c.description_en,
                    c.image, c.affiliate_url, c.expiry_date, c.is_active, c.is_best_offer,
                    c.is_most_used, c.is_exclusive, c.is_verified, c.used_count, c.view_count,
                    c.created_at, c.updated_at,
                    s.name AS store_name, s.name_en AS store_name_en, s.slug AS store_slug,
                    s.logo AS store_logo, s.url AS store_url
             FROM favorites f
             JOIN coupons c ON c.id = f.coupon_id
             JOIN stores s ON s.id = c.store_id
             WHERE f.user_id = $1
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
