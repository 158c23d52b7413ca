//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::auth::TokenService;
use crate::cli::{error, info, print_port_table, print_ship_table, success, warn, OutputFormat, Resource};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::db::{ShipFilter, Store};

fn load_config(path: Option<&Path>) -> Result<Config> {
    Ok(config::load_config(path)?)
}

async fn open_store(config: &Config) -> Result<Store> {
    let store = Store::connect(&config.database).await?;
    store.init_schema().await?;
    Ok(store)
}

/// Initialize a new harbor.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Set SECRET_KEY (or auth.secret) before running with environment = \"production\"");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config(config_path)?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}", host, port));

    if let Err(e) = crate::api::run_server(config, &host, port).await {
        error(&format!("Server stopped: {}", e));
        return Err(e.into());
    }
    Ok(())
}

/// Create the schema in the configured database
pub async fn migrate(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    open_store(&config).await?;
    success(&format!("Schema ready in {}", config.database.url));
    Ok(())
}

/// Issue a token offline
pub async fn token(config_path: Option<&Path>, email: &str, app_name: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let tokens = TokenService::from_config(&config)?;

    let claims = tokens.claims_for(email, app_name)?;
    let token = tokens.sign(&claims)?;

    success(&format!("Issued {} token for {}", claims.role(), claims.email));
    println!("{}", token);
    Ok(())
}

/// List ports or ships
pub async fn list(config_path: Option<&Path>, resource: Resource, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config).await?;

    match resource {
        Resource::Ports => {
            let ports = store.list_ports_with_usage().await?;
            match format {
                OutputFormat::Table => print_port_table(&ports),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ports)?),
            }
        }
        Resource::Ships => {
            let ships = store.list_ships(&ShipFilter::default()).await?;
            match format {
                OutputFormat::Table => print_ship_table(&ships),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ships)?),
            }
        }
    }

    Ok(())
}
