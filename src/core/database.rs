use crate::core::config::DatabaseConfig;
use crate::core::error::AppError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Apply the schema in `migrations/` (categories, pages, users, profiles, sessions)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a unique-constraint violation to [`AppError::Conflict`], anything else to `Database`
pub fn conflict_or_database(e: sqlx::Error, conflict_message: &str) -> AppError {
    let is_unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if is_unique_violation {
        AppError::Conflict(conflict_message.to_string())
    } else {
        AppError::Database(e)
    }
}
