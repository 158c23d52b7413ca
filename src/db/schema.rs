//! SQL DDL for the three resource tables.

/// SQLite schema:
/// - `port_usage.port_id` is UNIQUE, a port owns at most one usage row.
///   Its removal is done by the store together with the port.
/// - `ships.ship_current_port` is cleared when its port is deleted.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS ports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    port_name TEXT NOT NULL UNIQUE,
    port_locode TEXT NOT NULL UNIQUE,
    port_max_vessel_size TEXT NOT NULL,
    port_total_ships INTEGER NOT NULL,
    port_country TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS port_usage (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cargo_vessels TEXT NOT NULL,
    fishing_vessels TEXT NOT NULL,
    various_vessels TEXT NOT NULL,
    tanker_vessels TEXT NOT NULL,
    tug_offshore_supply_vessels TEXT NOT NULL,
    passenger_vessels TEXT NOT NULL,
    authority_military_vessels TEXT NOT NULL,
    sailing_vessels TEXT NOT NULL,
    aid_to_nav_vessels TEXT NOT NULL,
    port_id INTEGER NOT NULL UNIQUE REFERENCES ports(id),
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS ships (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ship_name TEXT NOT NULL,
    ship_country TEXT NOT NULL,
    ship_type TEXT NOT NULL,
    ship_length TEXT NOT NULL,
    ship_imo TEXT NOT NULL,
    ship_status TEXT NOT NULL,
    ship_mmsi_callsign TEXT NOT NULL,
    ship_current_port INTEGER NULL REFERENCES ports(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_ships_current_port ON ships(ship_current_port);
CREATE INDEX IF NOT EXISTS idx_ships_name ON ships(ship_name)
"#;
