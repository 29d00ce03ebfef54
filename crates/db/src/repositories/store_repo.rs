//! Repository for the `stores` table.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::store::{CreateStore, Store, UpdateStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, name_en, slug, logo, cover_image, url, description, \
                       description_en, is_featured, is_active, sort_order, click_count, \
                       created_at, updated_at";

/// Public ordering for store listings.
const ORDER: &str = "ORDER BY sort_order, is_featured DESC, name";

/// Provides CRUD and listing operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name, name_en, slug, logo, cover_image, url, description,
                                 description_en, is_featured, is_active, sort_order)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, $6, COALESCE($7, ''), COALESCE($8, ''),
                     COALESCE($9, false), COALESCE($10, true), COALESCE($11, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&input.name)
            .bind(&input.name_en)
            .bind(&input.slug)
            .bind(&input.logo)
            .bind(&input.cover_image)
            .bind(&input.url)
            .bind(&input.description)
            .bind(&input.description_en)
            .bind(input.is_featured)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE slug = $1 AND is_active");
        sqlx::query_as::<_, Store>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Count active stores whose name matches `pattern` (an `ILIKE` pattern).
    pub async fn count_active(pool: &PgPool, pattern: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stores
             WHERE is_active
               AND ($1::text IS NULL OR name ILIKE $1 OR name_en ILIKE $1)",
        )
        .bind(pattern)
        .fetch_one(pool)
        .await
    }

    /// One page of active stores whose name matches `pattern`.
    pub async fn list_active(
        pool: &PgPool,
        pattern: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stores
             WHERE is_active
               AND ($1::text IS NULL OR name ILIKE $1 OR name_en ILIKE $1)
             {ORDER}
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Featured active stores for the home page.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stores
             WHERE is_active AND is_featured
             {ORDER}
             LIMIT $1"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every store for the back office.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stores
             {ORDER}
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Bump the visit counter of a store.
    pub async fn increment_click_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE stores SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a store. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStore,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "UPDATE stores SET
                name = COALESCE($2, name),
                name_en = COALESCE($3, name_en),
                slug = COALESCE($4, slug),
                logo = COALESCE($5, logo),
                cover_image = COALESCE($6, cover_image),
                url = COALESCE($7, url),
                description = COALESCE($8, description),
                description_en = COALESCE($9, description_en),
                is_featured = COALESCE($10, is_featured),
                is_active = COALESCE($11, is_active),
                sort_order = COALESCE($12, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.name_en)
            .bind(&input.slug)
            .bind(&input.logo)
            .bind(&input.cover_image)
            .bind(&input.url)
            .bind(&input.description)
            .bind(&input.description_en)
            .bind(input.is_featured)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a store together with its coupons.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
