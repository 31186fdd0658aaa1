//! HTTP server command
//!
//! Loads config, opens the database, bootstraps the schema and serves the
//! contacts API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use phonebook_core::PhonebookConfig;
use phonebook_server::ServerConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// SQLite database file (default: phonebook.db)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ServeArgs {
    /// Flags win over config file and environment
    fn apply_to(&self, config: &mut PhonebookConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(ref path) = self.db_path {
            config.database.path = path.clone();
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(timeout) = self.timeout {
            config.server.request_timeout_secs = timeout;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = PhonebookConfig::load().context("Failed to load config")?;
    args.apply_to(&mut config);

    tracing::info!("Starting phonebook server on {}", config.server.bind);

    phonebook_server::serve(&config.database, ServerConfig::from(&config.server))
        .await
        .context("Server error")?;

    Ok(())
}
