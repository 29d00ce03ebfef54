//! Repository for the append-only `coupon_usages` table.
//!
//! Rows are never updated or deleted.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::usage::{CouponUsage, NewCouponUsage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, coupon_id, user_id, action, ip_address, user_agent, device_type, \
                       created_at";

pub struct UsageRepo;

impl UsageRepo {
    /// Append one usage event.
    pub async fn insert(pool: &PgPool, input: &NewCouponUsage) -> Result<CouponUsage, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let row = Self::insert_in(&mut tx, input).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Append one usage event within an existing transaction.
    pub(crate) async fn insert_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &NewCouponUsage,
    ) -> Result<CouponUsage, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupon_usages (coupon_id, user_id, action, ip_address, user_agent, device_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CouponUsage>(&query)
            .bind(input.coupon_id)
            .bind(input.user_id)
            .bind(input.action.as_str())
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(input.device_type.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Newest events first, optionally for one coupon.
    pub async fn list(
        pool: &PgPool,
        coupon_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CouponUsage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coupon_usages
             WHERE ($1::bigint IS NULL OR coupon_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CouponUsage>(&query)
            .bind(coupon_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_coupon(pool: &PgPool, coupon_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM coupon_usages WHERE coupon_id = $1")
            .bind(coupon_id)
            .fetch_one(pool)
            .await
    }
}
