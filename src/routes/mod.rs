//! Route definitions for the recipient filter API.

pub mod contact;
pub mod health;
pub mod rules;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Contact form payloads and rule definitions are tiny.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let contact_routes = Router::new().route("/contact/validate", post(contact::validate));

    let rule_routes = Router::new()
        .route("/rules", get(rules::list).post(rules::create))
        .route("/rules/activity", get(rules::activity_report))
        .route("/rules/types", get(rules::types))
        .route("/rules/{id}", delete(rules::delete))
        .route("/rules/{id}/activity", get(rules::rule_activity));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", contact_routes)
        .nest("/api/v1", rule_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
