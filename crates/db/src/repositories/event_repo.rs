//! Repository for the `events` table.

use chrono::{NaiveDate, Utc};
use clubsite_core::types::RecordId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_date, event_time, location, category, \
                       image_url, registration_url, is_featured, display_order, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        id: RecordId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (id, title, description, event_date, event_time, location,
                                 category, image_url, registration_url, is_featured, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.event_time)
            .bind(&input.location)
            .bind(input.category)
            .bind(&input.image_url)
            .bind(&input.registration_url)
            .bind(input.is_featured)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events soonest first, optionally narrowed by category and by
    /// whether they are upcoming (dated today or later).
    ///
    /// "Today" is the UTC date, matching the JSON backend.
    pub async fn list(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        Self::list_as_of(pool, filter, Utc::now().date_naive()).await
    }

    /// [`list`](Self::list) with an explicit notion of today.
    pub async fn list_as_of(
        pool: &PgPool,
        filter: &EventFilter,
        today: NaiveDate,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::event_category IS NULL OR category = $1)
               AND ($2::boolean IS NULL OR (event_date >= $3::date) = $2)
             ORDER BY event_date ASC, display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.category)
            .bind(filter.upcoming)
            .bind(today)
            .fetch_all(pool)
            .await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                event_time = CASE WHEN $5::text IS NULL THEN event_time ELSE NULLIF($5, '') END,
                location = COALESCE($6, location),
                category = COALESCE($7, category),
                image_url = CASE WHEN $8::text IS NULL THEN image_url ELSE NULLIF($8, '') END,
                registration_url = CASE WHEN $9::text IS NULL THEN registration_url ELSE NULLIF($9, '') END,
                is_featured = COALESCE($10, is_featured),
                display_order = COALESCE($11, display_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.event_time)
            .bind(&input.location)
            .bind(input.category)
            .bind(&input.image_url)
            .bind(&input.registration_url)
            .bind(input.is_featured)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
