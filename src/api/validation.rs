//! Request payload validation.
//!
//! Payloads arrive as JSON objects and leave as typed inputs or a 422 whose
//! message names the offending field next to the expected shape. Every
//! write is checked against a strict allow-list: keys outside it are
//! rejected, except `token`, which only carries the credential and is
//! dropped before anything else runs.

use serde_json::{Map, Value};

use crate::db::models::{NewPort, NewShip, PortPatch, ShipPatch, UsageFields, USAGE_FIELDS};
use crate::error::{Error, Result};

pub type Payload = Map<String, Value>;

/// Body field that may carry the credential
pub const TOKEN_FIELD: &str = "token";

pub const PORT_FORMAT: &str = "Expected format: { port_name: <String>, port_locode: <String>, port_max_vessel_size: <String>, port_total_ships: <Integer>, port_country: <String>, port_usage: <Object> }.";

pub const PORT_USAGE_FORMAT: &str = "Expected format: port_usage: { cargo_vessels: <String>, fishing_vessels: <String>, various_vessels: <String>, tanker_vessels: <String>, tug_offshore_supply_vessels: <String>, passenger_vessels: <String>, authority_military_vessels: <String>, sailing_vessels: <String>, aid_to_nav_vessels: <String> }.";

pub const USAGE_FORMAT: &str = "Expected format: { cargo_vessels: <String>, fishing_vessels: <String>, various_vessels: <String>, tanker_vessels: <String>, tug_offshore_supply_vessels: <String>, passenger_vessels: <String>, authority_military_vessels: <String>, sailing_vessels: <String>, aid_to_nav_vessels: <String> }.";

pub const SHIP_FORMAT: &str = "Expected format: { ship_name: <String>, ship_country: <String>, ship_type: <String>, ship_length: <String>, ship_imo: <String>, ship_status: <String>, ship_mmsi_callsign: <String>, ship_current_port: <Integer> }.";

pub const PORT_PATCH_FORMAT: &str =
    "Expected format: { port_max_vessel_size: <String>, port_total_ships: <Integer> }.";

pub const SHIP_PATCH_FORMAT: &str = "Expected format: { ship_country: <String>, ship_type: <String>, ship_status: <String>, ship_current_port: <Integer> }.";

pub const PORT_ID_IMMUTABLE: &str = "You cannot change the port_id of a port usage record.";

const PORT_FIELDS: [&str; 6] = [
    "port_name",
    "port_locode",
    "port_max_vessel_size",
    "port_total_ships",
    "port_country",
    "port_usage",
];

const SHIP_FIELDS: [&str; 8] = [
    "ship_name",
    "ship_country",
    "ship_type",
    "ship_length",
    "ship_imo",
    "ship_status",
    "ship_mmsi_callsign",
    "ship_current_port",
];

const PORT_PATCH_FIELDS: [&str; 2] = ["port_max_vessel_size", "port_total_ships"];

const SHIP_PATCH_FIELDS: [&str; 4] = [
    "ship_country",
    "ship_type",
    "ship_status",
    "ship_current_port",
];

fn missing(format: &str, field: &str) -> Error {
    Error::Validation(format!("{} You're missing a {} property.", format, field))
}

fn missing_valid(format: &str) -> Error {
    Error::Validation(format!("{} You're missing a valid property.", format))
}

fn not_allowed(format: &str, field: &str) -> Error {
    Error::Validation(format!("{} The {} property is not allowed.", format, field))
}

fn wrong_type(format: &str, field: &str, expected: &str) -> Error {
    Error::Validation(format!(
        "{} The {} property must be a {}.",
        format, field, expected
    ))
}

/// 422 for a write that points a ship at a port that does not exist
pub fn unknown_port(id: i64) -> Error {
    Error::Validation(format!("There is no port with an id of {}.", id))
}

/// Absent, null and blank strings all count as missing
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn first_missing<'a>(payload: &Payload, fields: &[&'a str]) -> Option<&'a str> {
    fields
        .iter()
        .copied()
        .find(|field| is_missing(payload.get(*field)))
}

fn reject_unknown(payload: &Payload, allowed: &[&str], format: &str) -> Result<()> {
    match payload
        .keys()
        .find(|key| key.as_str() != TOKEN_FIELD && !allowed.contains(&key.as_str()))
    {
        Some(key) => Err(not_allowed(format, key)),
        None => Ok(()),
    }
}

fn text(payload: &Payload, field: &str, format: &str) -> Result<String> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(wrong_type(format, field, "<String>")),
    }
}

/// Free-form values such as ship lengths ("105x16m") or IMO numbers,
/// stored as text whether sent as a string or a number
fn opaque(payload: &Payload, field: &str, format: &str) -> Result<String> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(wrong_type(format, field, "<String>")),
    }
}

fn integer(payload: &Payload, field: &str, format: &str) -> Result<i64> {
    payload
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| wrong_type(format, field, "<Integer>"))
}

fn optional_text(payload: &Payload, field: &str, format: &str) -> Result<Option<String>> {
    if is_missing(payload.get(field)) {
        return Ok(None);
    }
    text(payload, field, format).map(Some)
}

fn optional_integer(payload: &Payload, field: &str, format: &str) -> Result<Option<i64>> {
    if is_missing(payload.get(field)) {
        return Ok(None);
    }
    integer(payload, field, format).map(Some)
}

fn usage_fields(payload: &Payload, format: &str) -> Result<UsageFields> {
    if let Some(field) = first_missing(payload, &USAGE_FIELDS) {
        return Err(missing(format, field));
    }
    reject_unknown(payload, &USAGE_FIELDS, format)?;

    let mut values: [String; 9] = Default::default();
    for (value, field) in values.iter_mut().zip(USAGE_FIELDS) {
        *value = text(payload, field, format)?;
    }
    Ok(UsageFields::from_ordered(values))
}

/// Port creation: every top-level field first, then the nested usage object
pub fn validate_new_port(mut payload: Payload) -> Result<NewPort> {
    payload.remove(TOKEN_FIELD);

    if let Some(field) = first_missing(&payload, &PORT_FIELDS) {
        return Err(missing(PORT_FORMAT, field));
    }
    reject_unknown(&payload, &PORT_FIELDS, PORT_FORMAT)?;

    let port_name = text(&payload, "port_name", PORT_FORMAT)?;
    let port_locode = text(&payload, "port_locode", PORT_FORMAT)?;
    let port_max_vessel_size = text(&payload, "port_max_vessel_size", PORT_FORMAT)?;
    let port_total_ships = integer(&payload, "port_total_ships", PORT_FORMAT)?;
    let port_country = text(&payload, "port_country", PORT_FORMAT)?;
    let usage = match payload.get("port_usage") {
        Some(Value::Object(usage)) => usage,
        _ => return Err(wrong_type(PORT_FORMAT, "port_usage", "<Object>")),
    };

    let port_usage = usage_fields(usage, PORT_USAGE_FORMAT)?;

    Ok(NewPort {
        port_name,
        port_locode,
        port_max_vessel_size,
        port_total_ships,
        port_country,
        port_usage,
    })
}

pub fn validate_new_ship(mut payload: Payload) -> Result<NewShip> {
    payload.remove(TOKEN_FIELD);

    if let Some(field) = first_missing(&payload, &SHIP_FIELDS) {
        return Err(missing(SHIP_FORMAT, field));
    }
    reject_unknown(&payload, &SHIP_FIELDS, SHIP_FORMAT)?;

    Ok(NewShip {
        ship_name: text(&payload, "ship_name", SHIP_FORMAT)?,
        ship_country: text(&payload, "ship_country", SHIP_FORMAT)?,
        ship_type: text(&payload, "ship_type", SHIP_FORMAT)?,
        ship_length: opaque(&payload, "ship_length", SHIP_FORMAT)?,
        ship_imo: opaque(&payload, "ship_imo", SHIP_FORMAT)?,
        ship_status: text(&payload, "ship_status", SHIP_FORMAT)?,
        ship_mmsi_callsign: opaque(&payload, "ship_mmsi_callsign", SHIP_FORMAT)?,
        ship_current_port: integer(&payload, "ship_current_port", SHIP_FORMAT)?,
    })
}

pub fn validate_port_patch(mut payload: Payload) -> Result<PortPatch> {
    payload.remove(TOKEN_FIELD);

    if PORT_PATCH_FIELDS.iter().all(|f| is_missing(payload.get(*f))) {
        return Err(missing_valid(PORT_PATCH_FORMAT));
    }
    reject_unknown(&payload, &PORT_PATCH_FIELDS, PORT_PATCH_FORMAT)?;

    Ok(PortPatch {
        port_max_vessel_size: optional_text(&payload, "port_max_vessel_size", PORT_PATCH_FORMAT)?,
        port_total_ships: optional_integer(&payload, "port_total_ships", PORT_PATCH_FORMAT)?,
    })
}

pub fn validate_ship_patch(mut payload: Payload) -> Result<ShipPatch> {
    payload.remove(TOKEN_FIELD);

    if SHIP_PATCH_FIELDS.iter().all(|f| is_missing(payload.get(*f))) {
        return Err(missing_valid(SHIP_PATCH_FORMAT));
    }
    reject_unknown(&payload, &SHIP_PATCH_FIELDS, SHIP_PATCH_FORMAT)?;

    Ok(ShipPatch {
        ship_country: optional_text(&payload, "ship_country", SHIP_PATCH_FORMAT)?,
        ship_type: optional_text(&payload, "ship_type", SHIP_PATCH_FORMAT)?,
        ship_status: optional_text(&payload, "ship_status", SHIP_PATCH_FORMAT)?,
        ship_current_port: optional_integer(&payload, "ship_current_port", SHIP_PATCH_FORMAT)?,
    })
}

/// Full replacement of a usage row. The owning port cannot be changed.
pub fn validate_usage_replacement(mut payload: Payload) -> Result<UsageFields> {
    payload.remove(TOKEN_FIELD);

    if payload.contains_key("port_id") {
        return Err(Error::Validation(PORT_ID_IMMUTABLE.to_string()));
    }
    usage_fields(&payload, USAGE_FORMAT)
}
