//! Harbor - a JSON API for ports, their vessel usage and ships
//!
//! This is the library interface for Harbor: configuration, the token
//! service and auth gates, the relational store and the axum router.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use db::Store;
pub use error::Error;
