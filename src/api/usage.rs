//! Port usage endpoints

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};

use super::extract::{resource_id, RequestPayload};
use super::validation::validate_usage_replacement;
use super::SharedState;
use crate::auth::Claims;
use crate::db::PortUsage;
use crate::error::{Error, Result};

pub const USAGE_NOT_FOUND: &str = "There is no port usage for a port with this id.";

/// GET /api/v1/port-usage
pub async fn list_usage(State(state): State<SharedState>) -> Result<Json<Vec<PortUsage>>> {
    Ok(Json(state.store.list_port_usage().await?))
}

/// PUT /api/v1/port-usage/{id}, where `id` is the owning port
pub async fn replace_usage(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    port_id: std::result::Result<Path<i64>, PathRejection>,
    RequestPayload(payload): RequestPayload,
) -> Result<Json<Vec<PortUsage>>> {
    let port_id = resource_id(port_id, USAGE_NOT_FOUND)?;
    let fields = validate_usage_replacement(payload)?;
    let usage = state
        .store
        .replace_usage(port_id, &fields)
        .await?
        .ok_or_else(|| Error::NotFound(USAGE_NOT_FOUND.to_string()))?;

    tracing::info!(actor = %claims.email, port_id, "Replaced port usage");
    Ok(Json(vec![usage]))
}
