//! CLI interface for Harbor

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harbor")]
#[command(author = "Krakaw")]
#[command(version = "1.0.0")]
#[command(about = "JSON API for ports, port usage statistics and ships", long_about = None)]
pub struct Cli {
    /// Path to harbor.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new harbor.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Create the database schema
    Migrate,

    /// Issue a token with the configured signing secret
    Token {
        /// Email address of the requester; the domain decides write access
        #[arg(short, long)]
        email: String,

        /// Name of the requesting application
        #[arg(short, long)]
        app_name: String,
    },

    /// List records from the database
    List {
        /// Which records to list
        resource: Resource,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Resource {
    Ports,
    Ships,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
