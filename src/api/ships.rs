//! Ship endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};

use super::extract::{query, resource_id, RequestPayload};
use super::validation::{unknown_port, validate_new_ship, validate_ship_patch};
use super::SharedState;
use crate::auth::Claims;
use crate::db::{Ship, ShipFilter};
use crate::error::{Error, Result};

pub const NO_SUCH_SHIP: &str = "There is no ship with this id.";
pub const SHIP_NOT_FOUND: &str = "A ship matching the id submitted could not be found.";

async fn ensure_port(state: &SharedState, port_id: i64) -> Result<()> {
    if state.store.port_exists(port_id).await? {
        Ok(())
    } else {
        Err(unknown_port(port_id))
    }
}

/// GET /api/v1/ships?name=&port=
pub async fn list_ships(
    State(state): State<SharedState>,
    filter: std::result::Result<Query<ShipFilter>, QueryRejection>,
) -> Result<Json<Vec<Ship>>> {
    let filter = query(filter)?;
    Ok(Json(state.store.list_ships(&filter).await?))
}

/// GET /api/v1/ships/{id}
pub async fn get_ship(
    State(state): State<SharedState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Ship>>> {
    let id = resource_id(id, NO_SUCH_SHIP)?;
    let ship = state
        .store
        .get_ship(id)
        .await?
        .ok_or_else(|| Error::NotFound(NO_SUCH_SHIP.to_string()))?;
    Ok(Json(vec![ship]))
}

/// POST /api/v1/ships
pub async fn create_ship(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    RequestPayload(payload): RequestPayload,
) -> Result<(StatusCode, Json<Vec<Ship>>)> {
    let new = validate_new_ship(payload)?;
    ensure_port(&state, new.ship_current_port).await?;

    let ship = state.store.create_ship(&new).await?;
    tracing::info!(actor = %claims.email, ship_id = ship.id, "Created ship {}", ship.ship_name);
    Ok((StatusCode::CREATED, Json(vec![ship])))
}

/// PATCH /api/v1/ships/{id}
pub async fn update_ship(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    id: std::result::Result<Path<i64>, PathRejection>,
    RequestPayload(payload): RequestPayload,
) -> Result<Json<Vec<Ship>>> {
    let id = resource_id(id, SHIP_NOT_FOUND)?;
    let patch = validate_ship_patch(payload)?;
    if let Some(port_id) = patch.ship_current_port {
        ensure_port(&state, port_id).await?;
    }

    let ship = state
        .store
        .update_ship(id, &patch)
        .await?
        .ok_or_else(|| Error::NotFound(SHIP_NOT_FOUND.to_string()))?;

    tracing::info!(actor = %claims.email, ship_id = id, "Updated ship");
    Ok(Json(vec![ship]))
}

/// DELETE /api/v1/ships/{id}
pub async fn delete_ship(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let id = resource_id(id, SHIP_NOT_FOUND)?;
    if !state.store.delete_ship(id).await? {
        return Err(Error::NotFound(SHIP_NOT_FOUND.to_string()));
    }

    tracing::info!(actor = %claims.email, ship_id = id, "Deleted ship");
    Ok(StatusCode::NO_CONTENT)
}
