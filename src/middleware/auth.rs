//! Admin bearer-token extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use sha2::{Digest, Sha256};

use crate::errors::AppError;
use crate::AppState;

/// Marker proving the request carried the admin token.
///
/// Use as an Axum extractor in handlers that manage filter rules:
/// ```ignore
/// async fn handler(_admin: RequireAdmin) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        if state.config.admin_token_sha256.is_empty() {
            return Err(AppError::Forbidden("Admin API is disabled".to_string()));
        }
        if token_digest(token) != state.config.admin_token_sha256 {
            tracing::warn!("Rejected admin request with invalid token");
            return Err(AppError::Unauthorized);
        }

        Ok(RequireAdmin)
    }
}

/// Hex SHA-256 of a token, the form stored in `ADMIN_TOKEN_SHA256`.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
