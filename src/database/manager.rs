use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::config;

/// Errors from pool construction and health checks
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

fn database_url() -> Result<String, DatabaseError> {
    std::env::var("DATABASE_URL").map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))
}

/// Build the process-wide connection pool from DATABASE_URL. The pool is
/// created once in `main` and passed down through application state.
pub async fn connect() -> Result<PgPool, DatabaseError> {
    let url = database_url()?;
    let cfg = &config().database;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .connect(&url)
        .await?;

    info!("Created database pool ({} max connections)", cfg.max_connections);
    Ok(pool)
}

/// Build a pool without opening a connection. Connections are established on
/// first use, which lets test harnesses construct application state without
/// a live database.
pub fn connect_lazy(url: &str) -> Result<PgPool, DatabaseError> {
    let cfg = &config().database;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_lazy(url)?;

    Ok(pool)
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
