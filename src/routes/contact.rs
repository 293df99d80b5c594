//! Contact form validation hook called by the storefront.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::submission::ContactSubmission;
use crate::services::submission::{self, FailurePolicy, RequestRules};
use crate::AppState;

/// POST /api/v1/contact/validate — returns an empty list when the message may
/// be delivered, or a single message for the blocked sender.
pub async fn validate(
    State(state): State<AppState>,
    Json(body): Json<ContactSubmission>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let mut cache = RequestRules::new();
    let verdict = submission::check_submission(
        &state.db,
        &state.tables,
        FailurePolicy::from_fail_closed(state.config.fail_closed),
        &mut cache,
        &body,
    )
    .await?;
    Ok(ApiResponse::success(verdict.errors))
}
