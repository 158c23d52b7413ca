//! HTTP API server

pub mod extract;
pub mod ports;
pub mod server;
pub mod ships;
pub mod usage;
pub mod users;
pub mod validation;

pub use server::*;
