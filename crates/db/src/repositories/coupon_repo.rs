//! Repository for the `coupons` table.
//!
//! Public listings always go through [`JOINED_COLUMNS`] so each coupon
//! arrives with the store fields a listing needs.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::coupon::{Coupon, CouponFilter, CouponWithStore, CreateCoupon, UpdateCoupon};
use crate::models::usage::NewCouponUsage;
use crate::repositories::UsageRepo;

/// Column list for bare coupon rows.
const COLUMNS: &str = "id, store_id, category_id, title, title_en, code, discount_percentage, \
                       discount_value, description, description_en, image, affiliate_url, \
                       expiry_date, is_active, is_best_offer, is_most_used, is_exclusive, \
                       is_verified, used_count, view_count, created_at, updated_at";

/// Coupon columns plus the store columns of [`CouponWithStore`].
const JOINED_COLUMNS: &str = "c.id, c.store_id, c.category_id, c.title, c.title_en, c.code, \
                              c.discount_percentage, c.discount_value, c.description, \
                              c.description_en, c.image, c.affiliate_url, c.expiry_date, \
                              c.is_active, c.is_best_offer, c.is_most_used, c.is_exclusive, \
                              c.is_verified, c.used_count, c.view_count, c.created_at, \
                              c.updated_at, s.name AS store_name, s.name_en AS store_name_en, \
                              s.slug AS store_slug, s.logo AS store_logo, s.url AS store_url";

const FROM_JOINED: &str = "FROM coupons c \
                           JOIN stores s ON s.id = c.store_id \
                           LEFT JOIN categories cat ON cat.id = c.category_id";

/// Public ordering for coupon listings.
const ORDER: &str = "ORDER BY c.is_best_offer DESC, c.is_most_used DESC, c.created_at DESC, c.id DESC";

/// Shared predicate for [`CouponFilter`]; binds `$1` category slug,
/// `$2` store slug, `$3` `ILIKE` pattern.
const FILTER: &str = "WHERE c.is_active
                        AND ($1::text IS NULL OR cat.slug = $1)
                        AND ($2::text IS NULL OR s.slug = $2)
                        AND ($3::text IS NULL
                             OR c.title ILIKE $3 OR c.title_en ILIKE $3
                             OR c.code ILIKE $3 OR s.name ILIKE $3)";

/// Provides CRUD, listing and usage operations for coupons.
pub struct CouponRepo;

impl CouponRepo {
    /// Insert a new coupon, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCoupon) -> Result<Coupon, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupons (store_id, category_id, title, title_en, code,
                                  discount_percentage, discount_value, description,
                                  description_en, image, affiliate_url, expiry_date, is_active,
                                  is_best_offer, is_most_used, is_exclusive, is_verified)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, COALESCE($6, 0), $7, COALESCE($8, ''),
                     COALESCE($9, ''), $10, COALESCE($11, ''), $12, COALESCE($13, true),
                     COALESCE($14, false), COALESCE($15, false), COALESCE($16, false),
                     COALESCE($17, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(input.store_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.title_en)
            .bind(&input.code)
            .bind(input.discount_percentage)
            .bind(&input.discount_value)
            .bind(&input.description)
            .bind(&input.description_en)
            .bind(&input.image)
            .bind(&input.affiliate_url)
            .bind(input.expiry_date)
            .bind(input.is_active)
            .bind(input.is_best_offer)
            .bind(input.is_most_used)
            .bind(input.is_exclusive)
            .bind(input.is_verified)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons WHERE id = $1");
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Public listings
    // -----------------------------------------------------------------------

    /// Active best offers.
    pub async fn list_best_offers(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        Self::list_flagged(pool, "c.is_best_offer", limit).await
    }

    /// Active coupons flagged as most used.
    pub async fn list_most_used(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        Self::list_flagged(pool, "c.is_most_used", limit).await
    }

    /// Newest active coupons.
    pub async fn list_latest(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED}
             WHERE c.is_active
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Active coupons of one store.
    pub async fn list_for_store(
        pool: &PgPool,
        store_id: DbId,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED}
             WHERE c.is_active AND c.store_id = $1
             {ORDER}"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(store_id)
            .fetch_all(pool)
            .await
    }

    /// Count active coupons matching `filter`.
    pub async fn count_filtered(
        pool: &PgPool,
        filter: &CouponFilter<'_>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) {FROM_JOINED} {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.category_slug)
            .bind(filter.store_slug)
            .bind(filter.query.map(kobonat_core::search::contains_pattern))
            .fetch_one(pool)
            .await
    }

    /// One page of active coupons matching `filter`.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &CouponFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED} {FILTER}
             {ORDER}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(filter.category_slug)
            .bind(filter.store_slug)
            .bind(filter.query.map(kobonat_core::search::contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Full-page search over title, English title, code and description.
    pub async fn search(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED}
             WHERE c.is_active
               AND (c.title ILIKE $1 OR c.title_en ILIKE $1
                    OR c.code ILIKE $1 OR c.description ILIKE $1)
             {ORDER}
             LIMIT $2"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Typeahead search over title, code and store name.
    pub async fn typeahead(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED}
             WHERE c.is_active
               AND (c.title ILIKE $1 OR c.code ILIKE $1 OR s.name ILIKE $1)
             {ORDER}
             LIMIT $2"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Back office
    // -----------------------------------------------------------------------

    /// Every coupon, optionally restricted to one store.
    pub async fn list(
        pool: &PgPool,
        store_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED}
             WHERE ($1::bigint IS NULL OR c.store_id = $1)
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(store_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a coupon. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCoupon,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!(
            "UPDATE coupons SET
                store_id = COALESCE($2, store_id),
                category_id = CASE WHEN $3 THEN NULL ELSE COALESCE($4, category_id) END,
                title = COALESCE($5, title),
                title_en = COALESCE($6, title_en),
                code = COALESCE($7, code),
                discount_percentage = COALESCE($8, discount_percentage),
                discount_value = COALESCE($9, discount_value),
                description = COALESCE($10, description),
                description_en = COALESCE($11, description_en),
                image = COALESCE($12, image),
                affiliate_url = COALESCE($13, affiliate_url),
                expiry_date = COALESCE($14, expiry_date),
                is_active = COALESCE($15, is_active),
                is_best_offer = COALESCE($16, is_best_offer),
                is_most_used = COALESCE($17, is_most_used),
                is_exclusive = COALESCE($18, is_exclusive),
                is_verified = COALESCE($19, is_verified)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .bind(input.store_id)
            .bind(input.clear_category)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.title_en)
            .bind(&input.code)
            .bind(input.discount_percentage)
            .bind(&input.discount_value)
            .bind(&input.description)
            .bind(&input.description_en)
            .bind(&input.image)
            .bind(&input.affiliate_url)
            .bind(input.expiry_date)
            .bind(input.is_active)
            .bind(input.is_best_offer)
            .bind(input.is_most_used)
            .bind(input.is_exclusive)
            .bind(input.is_verified)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Usage
    // -----------------------------------------------------------------------

    /// Record a copy of an active coupon: bump `used_count` and append a
    /// usage row in one transaction.
    ///
    /// Returns `None` (and writes nothing) when the coupon does not exist
    /// or is inactive.
    pub async fn record_copy(
        pool: &PgPool,
        usage: &NewCouponUsage,
    ) -> Result<Option<CouponWithStore>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE coupons SET used_count = used_count + 1 WHERE id = $1 AND is_active",
        )
        .bind(usage.coupon_id)
        .execute(&mut *tx)
        .await?;
        if bumped.rows_affected() == 0 {
            return Ok(None);
        }

        UsageRepo::insert_in(&mut tx, usage).await?;

        let query = format!("SELECT {JOINED_COLUMNS} {FROM_JOINED} WHERE c.id = $1");
        let coupon = sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(usage.coupon_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(coupon))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn list_flagged(
        pool: &PgPool,
        flag: &str,
        limit: i64,
    ) -> Result<Vec<CouponWithStore>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED}
             WHERE c.is_active AND {flag}
             {ORDER}
             LIMIT $1"
        );
        sqlx::query_as::<_, CouponWithStore>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
