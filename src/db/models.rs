//! Row models and validated write inputs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The nine vessel-category columns of a usage row, in schema order
pub const USAGE_FIELDS: [&str; 9] = [
    "cargo_vessels",
    "fishing_vessels",
    "various_vessels",
    "tanker_vessels",
    "tug_offshore_supply_vessels",
    "passenger_vessels",
    "authority_military_vessels",
    "sailing_vessels",
    "aid_to_nav_vessels",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Port {
    pub id: i64,
    pub port_name: String,
    pub port_locode: String,
    pub port_max_vessel_size: String,
    pub port_total_ships: i64,
    pub port_country: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PortUsage {
    pub id: i64,
    pub cargo_vessels: String,
    pub fishing_vessels: String,
    pub various_vessels: String,
    pub tanker_vessels: String,
    pub tug_offshore_supply_vessels: String,
    pub passenger_vessels: String,
    pub authority_military_vessels: String,
    pub sailing_vessels: String,
    pub aid_to_nav_vessels: String,
    pub port_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A port with its usage row nested under `port_usage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortWithUsage {
    #[serde(flatten)]
    pub port: Port,
    pub port_usage: Option<PortUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ship {
    pub id: i64,
    pub ship_name: String,
    pub ship_country: String,
    pub ship_type: String,
    /// Free text such as "105x16m"
    pub ship_length: String,
    pub ship_imo: String,
    pub ship_status: String,
    pub ship_mmsi_callsign: String,
    /// Cleared when the port is deleted
    pub ship_current_port: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageFields {
    pub cargo_vessels: String,
    pub fishing_vessels: String,
    pub various_vessels: String,
    pub tanker_vessels: String,
    pub tug_offshore_supply_vessels: String,
    pub passenger_vessels: String,
    pub authority_military_vessels: String,
    pub sailing_vessels: String,
    pub aid_to_nav_vessels: String,
}

impl UsageFields {
    /// Build from values listed in [`USAGE_FIELDS`] order
    pub fn from_ordered(values: [String; 9]) -> Self {
        let [cargo_vessels, fishing_vessels, various_vessels, tanker_vessels, tug_offshore_supply_vessels, passenger_vessels, authority_military_vessels, sailing_vessels, aid_to_nav_vessels] =
            values;
        Self {
            cargo_vessels,
            fishing_vessels,
            various_vessels,
            tanker_vessels,
            tug_offshore_supply_vessels,
            passenger_vessels,
            authority_military_vessels,
            sailing_vessels,
            aid_to_nav_vessels,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPort {
    pub port_name: String,
    pub port_locode: String,
    pub port_max_vessel_size: String,
    pub port_total_ships: i64,
    pub port_country: String,
    pub port_usage: UsageFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    pub ship_name: String,
    pub ship_country: String,
    pub ship_type: String,
    pub ship_length: String,
    pub ship_imo: String,
    pub ship_status: String,
    pub ship_mmsi_callsign: String,
    pub ship_current_port: i64,
}

/// Mutable port fields; at least one is set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortPatch {
    pub port_max_vessel_size: Option<String>,
    pub port_total_ships: Option<i64>,
}

/// Mutable ship fields; at least one is set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShipPatch {
    pub ship_country: Option<String>,
    pub ship_type: Option<String>,
    pub ship_status: Option<String>,
    pub ship_current_port: Option<i64>,
}

/// Query filters for the ship list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipFilter {
    /// Exact ship name
    pub name: Option<String>,
    /// Current port id
    pub port: Option<i64>,
}
