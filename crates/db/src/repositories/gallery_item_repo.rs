//! Repository for the `gallery_items` table.

use clubsite_core::types::RecordId;
use sqlx::PgPool;

use crate::models::gallery_item::{
    CreateGalleryItem, GalleryItem, GalleryItemFilter, UpdateGalleryItem,
};

const COLUMNS: &str =
    "id, title, description, image_url, category, event_date, display_order, created_at, updated_at";

/// Provides CRUD operations for gallery items.
pub struct GalleryItemRepo;

impl GalleryItemRepo {
    pub async fn create(
        pool: &PgPool,
        id: RecordId,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_items (id, title, description, image_url, category, event_date,
                                        display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.category)
            .bind(input.event_date)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_items WHERE id = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &GalleryItemFilter,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_items
             WHERE ($1::gallery_category IS NULL OR category = $1)
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(filter.category)
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        input: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_items SET
                title = COALESCE($2, title),
                description = CASE WHEN $3::text IS NULL THEN description ELSE NULLIF($3, '') END,
                image_url = COALESCE($4, image_url),
                category = COALESCE($5, category),
                event_date = CASE WHEN $6::boolean THEN $7::date ELSE event_date END,
                display_order = COALESCE($8, display_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.category)
            .bind(input.event_date.is_some())
            .bind(input.event_date.flatten())
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
