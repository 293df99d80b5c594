//! Filter rule store: CRUD and the per-rule activity report.

use sqlx::PgPool;
use validator::Validate;

use crate::db::Tables;
use crate::errors::AppError;
use crate::models::filter_rule::{
    rule_type_name, CreateFilterRule, FilterRule, RuleActivity, RuleType, RuleTypeOption,
};
use crate::models::pagination::{PagedResult, Pagination};

/// Load every rule, ordered by id.
pub async fn load_rules(pool: &PgPool, tables: &Tables) -> Result<Vec<FilterRule>, AppError> {
    let rules = sqlx::query_as::<_, FilterRule>(&format!(
        "SELECT id, rule_type, pattern FROM {} ORDER BY id",
        tables.rules
    ))
    .fetch_all(pool)
    .await?;
    Ok(rules)
}

/// Create a rule. Nothing is written unless both fields are present and the
/// type is recognized.
pub async fn add_rule(
    pool: &PgPool,
    tables: &Tables,
    body: &CreateFilterRule,
) -> Result<FilterRule, AppError> {
    body.validate()?;

    let rule = sqlx::query_as::<_, FilterRule>(&format!(
        "INSERT INTO {} (rule_type, pattern) VALUES ($1, $2) RETURNING id, rule_type, pattern",
        tables.rules
    ))
    .bind(&body.rule_type)
    .bind(&body.pattern)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        rule_id = rule.id,
        rule_type = %rule.rule_type,
        pattern = %rule.pattern,
        "Filter rule created"
    );
    Ok(rule)
}

/// Delete a rule. Its activity history stays in place.
pub async fn delete_rule(pool: &PgPool, tables: &Tables, id: i64) -> Result<(), AppError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", tables.rules))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Filter rule {id} not found")));
    }

    tracing::info!(rule_id = id, "Filter rule deleted");
    Ok(())
}

/// First/last match, total matches and matches in the trailing 24 hours for
/// each rule. Rules that never matched are listed with zero counts.
pub async fn activity_report(
    pool: &PgPool,
    tables: &Tables,
    pagination: &Pagination,
) -> Result<PagedResult<RuleActivity>, AppError> {
    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", tables.rules))
        .fetch_one(pool)
        .await?;

    let mut rows = sqlx::query_as::<_, RuleActivity>(&format!(
        r#"
        SELECT
            rr.id,
            rr.rule_type,
            rr.pattern,
            MIN(a.ts) AS first_seen,
            MAX(a.ts) AS last_seen,
            COUNT(a.id) AS cnt_total,
            COUNT(a.id) FILTER (WHERE a.ts > NOW() - INTERVAL '1 day') AS cnt_last_day
        FROM {rules} rr
        LEFT JOIN {activity} a ON a.rule_id = rr.id
        GROUP BY rr.id
        ORDER BY rr.id
        LIMIT $1 OFFSET $2
        "#,
        rules = tables.rules,
        activity = tables.activity,
    ))
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    for row in &mut rows {
        row.type_name = rule_type_name(&row.rule_type).to_string();
    }

    Ok(PagedResult::new(rows, total, pagination))
}

/// Rule types offered when creating a rule.
pub fn rule_types() -> Vec<RuleTypeOption> {
    RuleType::ALL.into_iter().map(RuleTypeOption::from).collect()
}
