//! Repository for the `team_members` table.

use clubsite_core::types::RecordId;
use sqlx::PgPool;

use crate::models::team_member::{
    CreateTeamMember, TeamMember, TeamMemberFilter, UpdateTeamMember,
};

const COLUMNS: &str = "id, name, role, team, bio, image_url, linkedin_url, github_url, email, \
                       display_order, created_at, updated_at";

/// Provides CRUD operations for team members.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    pub async fn create(
        pool: &PgPool,
        id: RecordId,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (id, name, role, team, bio, image_url, linkedin_url,
                                       github_url, email, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(input.team)
            .bind(&input.bio)
            .bind(&input.image_url)
            .bind(&input.linkedin_url)
            .bind(&input.github_url)
            .bind(&input.email)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List members in page order, optionally restricted to one team section.
    pub async fn list(
        pool: &PgPool,
        filter: &TeamMemberFilter,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members
             WHERE ($1::team_category IS NULL OR team = $1)
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(filter.team)
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                team = COALESCE($4, team),
                bio = CASE WHEN $5::text IS NULL THEN bio ELSE NULLIF($5, '') END,
                image_url = CASE WHEN $6::text IS NULL THEN image_url ELSE NULLIF($6, '') END,
                linkedin_url = CASE WHEN $7::text IS NULL THEN linkedin_url ELSE NULLIF($7, '') END,
                github_url = CASE WHEN $8::text IS NULL THEN github_url ELSE NULLIF($8, '') END,
                email = CASE WHEN $9::text IS NULL THEN email ELSE NULLIF($9, '') END,
                display_order = COALESCE($10, display_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(input.team)
            .bind(&input.bio)
            .bind(&input.image_url)
            .bind(&input.linkedin_url)
            .bind(&input.github_url)
            .bind(&input.email)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
