//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::schema;
use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub schema_version: Option<i32>,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks database connectivity and the installed schema.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let (database, schema_version) =
        match schema::installed_version(&state.db, &state.tables).await {
            Ok(version) => ("connected".to_string(), version),
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                (format!("error: {e}"), None)
            }
        };

    let status = if schema_version.is_some() {
        "ok"
    } else {
        "degraded"
    };

    ApiResponse::success(HealthStatus {
        status: status.to_string(),
        database,
        schema_version,
    })
}
