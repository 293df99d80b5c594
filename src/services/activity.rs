//! Append-only activity log for matched rules.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::Tables;
use crate::errors::AppError;
use crate::models::activity::ActivityRecord;

/// Append one activity entry for a rule. Returns `None` without writing when
/// the rule no longer exists, so every entry refers to a rule that was present
/// when it was written.
pub async fn record_activity(
    pool: &PgPool,
    tables: &Tables,
    rule_id: i64,
    ts: DateTime<Utc>,
) -> Result<Option<ActivityRecord>, AppError> {
    let record = sqlx::query_as::<_, ActivityRecord>(&format!(
        r#"
        INSERT INTO {activity} (rule_id, ts)
        SELECT $1, $2
        WHERE EXISTS (SELECT 1 FROM {rules} WHERE id = $1)
        RETURNING id, rule_id, ts
        "#,
        activity = tables.activity,
        rules = tables.rules,
    ))
    .bind(rule_id)
    .bind(ts)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Record every matched rule. Failures are logged and skipped so a broken
/// activity table never changes a blocking decision. Returns the number of
/// entries written.
pub async fn record_matches(
    pool: &PgPool,
    tables: &Tables,
    rule_ids: &[i64],
    ts: DateTime<Utc>,
) -> usize {
    let mut written = 0;
    for &rule_id in rule_ids {
        match record_activity(pool, tables, rule_id, ts).await {
            Ok(Some(_)) => written += 1,
            Ok(None) => {
                tracing::debug!(rule_id, "Filter rule deleted before its activity was written");
            }
            Err(e) => {
                tracing::warn!(rule_id, error = %e, "Failed to record filter rule activity");
            }
        }
    }
    written
}

/// Full history for one rule, newest first.
pub async fn list_for_rule(
    pool: &PgPool,
    tables: &Tables,
    rule_id: i64,
) -> Result<Vec<ActivityRecord>, AppError> {
    let records = sqlx::query_as::<_, ActivityRecord>(&format!(
        "SELECT id, rule_id, ts FROM {} WHERE rule_id = $1 ORDER BY ts DESC, id DESC",
        tables.activity
    ))
    .bind(rule_id)
    .fetch_all(pool)
    .await?;
    Ok(records)
}
