pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub tables: db::Tables,
}

impl AppState {
    /// Bundle the pool and config, resolving table names from the prefix.
    pub fn new(db: PgPool, config: config::AppConfig) -> Result<Self, errors::AppError> {
        let tables = db::Tables::new(&config.table_prefix)?;
        Ok(Self { db, config, tables })
    }
}
