//! Port endpoints

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::extract::{resource_id, RequestPayload};
use super::validation::{validate_new_port, validate_port_patch};
use super::SharedState;
use crate::auth::Claims;
use crate::db::{Port, PortWithUsage};
use crate::error::{Error, Result};

pub const NO_SUCH_PORT: &str = "There is no port with this id.";
pub const PORT_NOT_FOUND: &str = "A port matching the id submitted could not be found.";

/// GET /api/v1/ports
pub async fn list_ports(State(state): State<SharedState>) -> Result<Json<Vec<PortWithUsage>>> {
    Ok(Json(state.store.list_ports_with_usage().await?))
}

/// GET /api/v1/ports/{id}
pub async fn get_port(
    State(state): State<SharedState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<PortWithUsage>>> {
    let id = resource_id(id, NO_SUCH_PORT)?;
    let port = state
        .store
        .get_port_with_usage(id)
        .await?
        .ok_or_else(|| Error::NotFound(NO_SUCH_PORT.to_string()))?;
    Ok(Json(vec![port]))
}

/// POST /api/v1/ports
pub async fn create_port(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    RequestPayload(payload): RequestPayload,
) -> Result<(StatusCode, Json<PortWithUsage>)> {
    let new = validate_new_port(payload)?;
    let created = state.store.create_port(&new).await?;

    tracing::info!(actor = %claims.email, port_id = created.port.id, "Created port {}", created.port.port_name);
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/v1/ports/{id}
pub async fn update_port(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    id: std::result::Result<Path<i64>, PathRejection>,
    RequestPayload(payload): RequestPayload,
) -> Result<Json<Vec<Port>>> {
    let id = resource_id(id, PORT_NOT_FOUND)?;
    let patch = validate_port_patch(payload)?;
    let port = state
        .store
        .update_port(id, &patch)
        .await?
        .ok_or_else(|| Error::NotFound(PORT_NOT_FOUND.to_string()))?;

    tracing::info!(actor = %claims.email, port_id = id, "Updated port");
    Ok(Json(vec![port]))
}

/// DELETE /api/v1/ports/{id}, together with its usage row
pub async fn delete_port(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let id = resource_id(id, PORT_NOT_FOUND)?;
    if !state.store.delete_port(id).await? {
        return Err(Error::NotFound(PORT_NOT_FOUND.to_string()));
    }

    tracing::info!(actor = %claims.email, port_id = id, "Deleted port");
    Ok(StatusCode::NO_CONTENT)
}
