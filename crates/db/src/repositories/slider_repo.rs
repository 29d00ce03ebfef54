//! Repository for the `slider_items` table.

use kobonat_core::types::DbId;
use sqlx::PgPool;

use crate::models::slider::{CreateSliderItem, SliderItem, UpdateSliderItem};

const COLUMNS: &str = "id, title, title_en, subtitle, subtitle_en, image, link, button_text, \
                       button_text_en, sort_order, is_active, click_count, created_at, updated_at";

pub struct SliderRepo;

impl SliderRepo {
    /// Insert a slide. Button labels fall back to the column defaults.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSliderItem,
    ) -> Result<SliderItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO slider_items (title, title_en, subtitle, subtitle_en, image, link,
                                       button_text, button_text_en, sort_order, is_active)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), $5,
                     COALESCE($6, ''), COALESCE($7, 'تسوق الآن'), COALESCE($8, 'Shop Now'),
                     COALESCE($9, 0), COALESCE($10, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SliderItem>(&query)
            .bind(&input.title)
            .bind(&input.title_en)
            .bind(&input.subtitle)
            .bind(&input.subtitle_en)
            .bind(&input.image)
            .bind(&input.link)
            .bind(&input.button_text)
            .bind(&input.button_text_en)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SliderItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slider_items WHERE id = $1");
        sqlx::query_as::<_, SliderItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active slides in display order.
    pub async fn list_active(pool: &PgPool, limit: i64) -> Result<Vec<SliderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slider_items
             WHERE is_active
             ORDER BY sort_order, id
             LIMIT $1"
        );
        sqlx::query_as::<_, SliderItem>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<SliderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slider_items
             ORDER BY sort_order, id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, SliderItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSliderItem,
    ) -> Result<Option<SliderItem>, sqlx::Error> {
        let query = format!(
            "UPDATE slider_items SET
                title = COALESCE($2, title),
                title_en = COALESCE($3, title_en),
                subtitle = COALESCE($4, subtitle),
                subtitle_en = COALESCE($5, subtitle_en),
                image = COALESCE($6, image),
                link = COALESCE($7, link),
                button_text = COALESCE($8, button_text),
                button_text_en = COALESCE($9, button_text_en),
                sort_order = COALESCE($10, sort_order),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SliderItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.title_en)
            .bind(&input.subtitle)
            .bind(&input.subtitle_en)
            .bind(&input.image)
            .bind(&input.link)
            .bind(&input.button_text)
            .bind(&input.button_text_en)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slider_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
