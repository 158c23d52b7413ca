//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "harbor.toml";

/// Load configuration.
///
/// An explicit path must exist. Without one, `harbor.toml` is searched for
/// upward from the current directory and defaults are used if none is
/// found. Environment overrides are applied last.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_config_from_path(path)?,
        None => match find_config_file() {
            Some(found) => {
                tracing::debug!("Loading configuration from {}", found.display());
                load_config_from_path(&found)?
            }
            None => Config::default(),
        },
    };

    apply_overrides(&mut config, |key| env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Apply `PORT`, `SECRET_KEY`, `DATABASE_URL` and `HARBOR_ENV` on top of the file
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Invalid PORT: {}", port)))?;
    }
    if let Some(secret) = lookup("SECRET_KEY") {
        config.auth.secret = Some(secret);
    }
    if let Some(url) = lookup("DATABASE_URL") {
        config.database.url = url;
    }
    if let Some(environment) = lookup("HARBOR_ENV") {
        config.environment = environment.parse()?;
    }
    Ok(())
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Option<PathBuf> {
    let mut current = env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Constant pattern
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("interpolation pattern is valid");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Harbor Configuration

# "production" refuses to start without a signing secret
environment = "development"

[server]
host = "0.0.0.0"
port = 3000
static_dir = "./public"

[database]
url = "sqlite://harbor.db?mode=rwc"
max_connections = 5

[auth]
# secret = "${SECRET_KEY}"
trusted_domain = "turing.io"
token_ttl_hours = 48
"#
}
