//! Admin routes for managing filter rules and reading their activity.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::RequireAdmin;
use crate::models::activity::ActivityRecord;
use crate::models::filter_rule::{CreateFilterRule, FilterRule, RuleActivity, RuleTypeOption};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::{activity, rules as rule_service};
use crate::AppState;

/// GET /api/v1/rules — list all filter rules.
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ApiResponse<Vec<FilterRule>>>, AppError> {
    let rules = rule_service::load_rules(&state.db, &state.tables).await?;
    Ok(ApiResponse::success(rules))
}

/// POST /api/v1/rules — create a filter rule.
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<CreateFilterRule>,
) -> Result<Json<ApiResponse<FilterRule>>, AppError> {
    let rule = rule_service::add_rule(&state.db, &state.tables, &body).await?;
    Ok(ApiResponse::success(rule))
}

/// DELETE /api/v1/rules/{id} — delete a filter rule, keeping its history.
pub async fn delete(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    rule_service::delete_rule(&state.db, &state.tables, id).await?;
    Ok(ApiResponse::success(()))
}

/// GET /api/v1/rules/activity — per-rule activity report with pagination.
pub async fn activity_report(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<RuleActivity>>>, AppError> {
    let report = rule_service::activity_report(&state.db, &state.tables, &pagination).await?;
    Ok(ApiResponse::success(report))
}

/// GET /api/v1/rules/{id}/activity — raw activity entries for one rule.
pub async fn rule_activity(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ActivityRecord>>>, AppError> {
    let records = activity::list_for_rule(&state.db, &state.tables, id).await?;
    Ok(ApiResponse::success(records))
}

/// GET /api/v1/rules/types — rule types selectable in the admin form.
pub async fn types(_admin: RequireAdmin) -> Json<ApiResponse<Vec<RuleTypeOption>>> {
    ApiResponse::success(rule_service::rule_types())
}
