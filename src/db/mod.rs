//! Database connection pool, table naming and schema lifecycle.

pub mod schema;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::AppError;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

const MAX_PREFIX_LEN: usize = 24;

/// Fully qualified table names for one installation.
///
/// Table names cannot be bound as query parameters, so the prefix is
/// validated once here and the names are spliced into SQL text afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub rules: String,
    pub activity: String,
    pub schema_version: String,
}

impl Tables {
    pub fn new(prefix: &str) -> Result<Self, AppError> {
        if prefix.starts_with(|c: char| c.is_ascii_digit())
            || !prefix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(AppError::Validation(format!(
                "table prefix '{prefix}' must be lowercase ASCII letters, digits and underscores, not starting with a digit"
            )));
        }
        // Longest derived identifier must stay within Postgres' 63 byte limit.
        if prefix.len() > MAX_PREFIX_LEN {
            return Err(AppError::Validation(format!(
                "table prefix must be at most {MAX_PREFIX_LEN} characters"
            )));
        }
        Ok(Self {
            rules: format!("{prefix}cfrf_recipient_rule"),
            activity: format!("{prefix}cfrf_recipient_rule_activity"),
            schema_version: format!("{prefix}cfrf_schema_version"),
        })
    }
}
