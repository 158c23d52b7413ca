//! Token issuance endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use super::extract::RequestPayload;
use super::SharedState;
use crate::auth::{AuthRequest, TokenResponse};
use crate::error::{Error, Result};

/// POST /api/v1/user/authenticate
///
/// Accepts a JSON or form body. An unreadable body is treated like an
/// empty one, so it is reported as a missing parameter.
pub async fn authenticate(
    State(state): State<SharedState>,
    body: std::result::Result<RequestPayload, Error>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let req = body
        .ok()
        .and_then(|RequestPayload(payload)| {
            serde_json::from_value::<AuthRequest>(Value::Object(payload)).ok()
        })
        .unwrap_or_default();

    let claims = state.tokens.claims_for(
        req.email.as_deref().unwrap_or_default(),
        req.app_name.as_deref().unwrap_or_default(),
    )?;
    let token = state.tokens.sign(&claims)?;

    tracing::info!(
        email = %claims.email,
        app = %claims.app_name,
        role = %claims.role(),
        "Issued token"
    );

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
