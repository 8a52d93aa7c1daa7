//! Repository for the `projects` table.

use clubsite_core::types::RecordId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

const COLUMNS: &str = "id, title, description, tech_stack, image_url, github_url, demo_url, \
                       color, display_order, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(
        pool: &PgPool,
        id: RecordId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, title, description, tech_stack, image_url, github_url,
                                   demo_url, color, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tech_stack)
            .bind(&input.image_url)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .bind(input.color)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::accent_color IS NULL OR color = $1)
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.color)
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tech_stack = COALESCE($4, tech_stack),
                image_url = CASE WHEN $5::text IS NULL THEN image_url ELSE NULLIF($5, '') END,
                github_url = CASE WHEN $6::text IS NULL THEN github_url ELSE NULLIF($6, '') END,
                demo_url = CASE WHEN $7::text IS NULL THEN demo_url ELSE NULLIF($7, '') END,
                color = COALESCE($8, color),
                display_order = COALESCE($9, display_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tech_stack)
            .bind(&input.image_url)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .bind(input.color)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
