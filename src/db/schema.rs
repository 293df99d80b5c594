//! Versioned schema migrations and the install/uninstall/reset lifecycle.
//!
//! Each migration renders its DDL for a concrete [`Tables`] set, so several
//! installations with different prefixes can share one database. Applied
//! versions are recorded in the `cfrf_schema_version` table.

use serde::Serialize;
use sqlx::PgPool;

use crate::db::Tables;
use crate::errors::AppError;
use crate::models::filter_rule::RuleType;

/// Parameters of one installation.
#[derive(Debug, Clone)]
pub struct SchemaOptions {
    pub table_prefix: String,
}

impl SchemaOptions {
    pub fn new(table_prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
        }
    }

    pub fn tables(&self) -> Result<Tables, AppError> {
        Tables::new(&self.table_prefix)
    }
}

/// A single forward migration.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub up: fn(&Tables) -> Vec<String>,
}

/// All migrations in application order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create filter rule and activity tables",
        up: create_tables,
    },
    Migration {
        version: 2,
        description: "index activity by rule and timestamp",
        up: index_activity,
    },
];

fn create_tables(tables: &Tables) -> Vec<String> {
    let allowed = RuleType::ALL
        .iter()
        .map(|t| format!("'{}'", t.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {rules} (
                id BIGSERIAL PRIMARY KEY,
                rule_type TEXT NOT NULL CHECK (rule_type IN ({allowed})),
                pattern TEXT NOT NULL CHECK (pattern <> ''),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            rules = tables.rules,
        ),
        // No foreign key: history outlives deleted rules.
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {activity} (
                id BIGSERIAL PRIMARY KEY,
                rule_id BIGINT NOT NULL,
                ts TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            activity = tables.activity,
        ),
    ]
}

fn index_activity(tables: &Tables) -> Vec<String> {
    vec![format!(
        "CREATE INDEX IF NOT EXISTS {activity}_rule_ts ON {activity} (rule_id, ts)",
        activity = tables.activity,
    )]
}

/// Outcome of an install run.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub applied: Vec<i32>,
    pub current_version: i32,
}

/// Apply every pending migration inside a single transaction.
pub async fn install(pool: &PgPool, options: &SchemaOptions) -> Result<InstallReport, AppError> {
    let tables = options.tables()?;
    let mut tx = pool.begin().await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {versions} (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        versions = tables.schema_version,
    ))
    .execute(&mut *tx)
    .await?;

    let done: Vec<i32> = sqlx::query_scalar(&format!(
        "SELECT version FROM {} ORDER BY version",
        tables.schema_version
    ))
    .fetch_all(&mut *tx)
    .await?;

    let mut applied = Vec::new();
    for migration in pending(&done) {
        for statement in (migration.up)(&tables) {
            sqlx::query(&statement).execute(&mut *tx).await.map_err(|e| {
                AppError::Schema(format!("migration {} failed: {e}", migration.version))
            })?;
        }
        sqlx::query(&format!(
            "INSERT INTO {} (version, description) VALUES ($1, $2)",
            tables.schema_version
        ))
        .bind(migration.version)
        .bind(migration.description)
        .execute(&mut *tx)
        .await?;

        tracing::info!(
            version = migration.version,
            description = migration.description,
            prefix = %options.table_prefix,
            "Applied schema migration"
        );
        applied.push(migration.version);
    }

    tx.commit().await?;

    Ok(InstallReport {
        applied,
        current_version: latest_version(),
    })
}

/// Drop every table owned by the filter, history included.
pub async fn uninstall(pool: &PgPool, options: &SchemaOptions) -> Result<(), AppError> {
    let tables = options.tables()?;
    for table in [&tables.activity, &tables.rules, &tables.schema_version] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(pool)
            .await?;
    }
    tracing::info!(prefix = %options.table_prefix, "Removed filter tables");
    Ok(())
}

/// Drop and recreate all filter tables.
pub async fn reset(pool: &PgPool, options: &SchemaOptions) -> Result<InstallReport, AppError> {
    uninstall(pool, options).await?;
    install(pool, options).await
}

/// Highest version recorded in the database, or `None` when not installed.
pub async fn installed_version(pool: &PgPool, tables: &Tables) -> Result<Option<i32>, AppError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
        )
        "#,
    )
    .bind(&tables.schema_version)
    .fetch_one(pool)
    .await?;
    if !exists {
        return Ok(None);
    }

    let version: Option<i32> = sqlx::query_scalar(&format!(
        "SELECT MAX(version) FROM {}",
        tables.schema_version
    ))
    .fetch_one(pool)
    .await?;
    Ok(version)
}

fn pending(done: &[i32]) -> impl Iterator<Item = &'static Migration> + '_ {
    MIGRATIONS.iter().filter(move |m| !done.contains(&m.version))
}

fn latest_version() -> i32 {
    MIGRATIONS.iter().map(|m| m.version).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_versions_strictly_increase() {
        let versions: Vec<i32> = MIGRATIONS.iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(latest_version(), 2);
    }

    #[test]
    fn ddl_targets_prefixed_tables() {
        let tables = Tables::new("shop1_").unwrap();
        let ddl: Vec<String> = MIGRATIONS.iter().flat_map(|m| (m.up)(&tables)).collect();
        assert!(ddl[0].contains("CREATE TABLE IF NOT EXISTS shop1_cfrf_recipient_rule ("));
        assert!(ddl[1].contains("shop1_cfrf_recipient_rule_activity"));
        assert!(ddl[2].contains("ON shop1_cfrf_recipient_rule_activity (rule_id, ts)"));
    }

    #[test]
    fn rule_table_restricts_types() {
        let tables = Tables::new("tb_").unwrap();
        let ddl = create_tables(&tables);
        assert!(ddl[0].contains("'contains', 'starts_with', 'ends_with'"));
    }

    #[test]
    fn pending_skips_applied_versions() {
        let versions: Vec<i32> = pending(&[1]).map(|m| m.version).collect();
        assert_eq!(versions, vec![2]);
        assert_eq!(pending(&[1, 2]).count(), 0);
        assert_eq!(pending(&[]).count(), MIGRATIONS.len());
    }

    #[test]
    fn invalid_prefix_is_rejected_before_touching_the_database() {
        let options = SchemaOptions::new("bad prefix");
        assert!(options.tables().unwrap_err().is_validation());
    }
}
