//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Signing secret used when none is configured outside production.
/// Anyone holding the source can forge tokens with it.
pub const DEVELOPMENT_SECRET: &str = "harbor-insecure-development-secret";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::Config(format!("Unknown environment: {}", other))),
        }
    }
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for any path no API route matches
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./public")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// Relational store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    "sqlite://harbor.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory configuration, one database per pool
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Token issuance and verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Email domain whose holders receive write access
    #[serde(default = "default_trusted_domain")]
    pub trusted_domain: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_trusted_domain() -> String {
    "turing.io".to_string()
}

fn default_token_ttl_hours() -> i64 {
    48
}

/// Longest accepted token lifetime, one year
pub const MAX_TOKEN_TTL_HOURS: i64 = 8760;

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            trusted_domain: default_trusted_domain(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

impl AuthConfig {
    /// Token lifetime, between one hour and [`MAX_TOKEN_TTL_HOURS`]
    pub fn token_ttl(&self) -> Result<chrono::Duration> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(Error::Config(format!(
                "auth.token_ttl_hours must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_HOURS, self.token_ttl_hours
            )));
        }
        Ok(chrono::Duration::hours(self.token_ttl_hours))
    }
}

impl Config {
    /// Reject settings that cannot be served
    pub fn validate(&self) -> Result<()> {
        self.auth.token_ttl()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Resolve the signing secret.
    ///
    /// Production refuses to start without an explicit secret; other
    /// environments fall back to [`DEVELOPMENT_SECRET`].
    pub fn signing_secret(&self) -> Result<String> {
        match self.auth.secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(secret.to_string()),
            _ if self.is_production() => Err(Error::Config(
                "SECRET_KEY must be set when running in production".to_string(),
            )),
            _ => {
                tracing::warn!("No signing secret configured, using the development secret");
                Ok(DEVELOPMENT_SECRET.to_string())
            }
        }
    }
}
