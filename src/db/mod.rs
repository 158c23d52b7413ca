//! Relational store: row models, schema and the query interface.
//!
//! Layout:
//! - `models.rs`: rows as returned to clients and validated write inputs
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `store.rs`: the query interface used by the handlers

pub mod models;
pub mod schema;
pub mod store;

pub use models::{
    NewPort, NewShip, Port, PortPatch, PortUsage, PortWithUsage, Ship, ShipFilter, ShipPatch,
    UsageFields,
};
pub use store::Store;
