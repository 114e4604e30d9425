//! SQLite persistence layer for VolleyScout.
//!
//! The database lives in a single local file next to the application data.
//! Repositories are zero-sized structs with async CRUD methods that accept
//! `&DbPool` as the first argument; multi-step writes (scout-model
//! synchronization, roster reordering) run inside a single transaction.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Embedded migrations, applied with `MIGRATOR.run(&pool)` on startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Fallback database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://volleyscout.db";

/// Resolve the database URL from the environment (`.env` aware).
pub fn database_url_from_env() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Create a connection pool from a database URL.
///
/// The database file is created on first use. Foreign keys are enforced on
/// every connection; the cascade behaviour of the schema depends on it.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    tracing::info!(url = database_url, "database pool ready");
    Ok(pool)
}

/// Cheap connectivity probe.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
