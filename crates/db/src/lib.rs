//! Storage layer for club site content.
//!
//! Two interchangeable backends implement the same [`ContentStore`]
//! contract:
//!
//! - [`PgStore`] -- Postgres (including a Supabase-hosted database), with
//!   SQL in [`repositories`] and embedded migrations.
//! - [`JsonFileStore`] -- one JSON file per collection, used when no
//!   database is configured.

use sqlx::postgres::PgPoolOptions;

pub mod entity;
pub mod error;
pub mod json_file;
pub mod models;
pub mod pg_store;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use pg_store::PgStore;
pub use store::{ContentStore, EntityStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
