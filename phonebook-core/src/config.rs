use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PhonebookError, Result};

/// Environment variable pointing at an alternate config file
pub const CONFIG_PATH_ENV: &str = "PHONEBOOK_CONFIG";
/// Overrides `database.path`
pub const DB_PATH_ENV: &str = "PHONEBOOK_DB_PATH";
/// Overrides `server.bind`
pub const BIND_ENV: &str = "PHONEBOOK_BIND";
/// Overrides `client.endpoint`
pub const ENDPOINT_ENV: &str = "PHONEBOOK_ENDPOINT";

/// Centralized configuration for the phonebook server and client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PhonebookConfig {
    pub server: ServerSection,
    pub database: DatabaseConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_permissive: false,
            request_timeout_secs: 30,
        }
    }
}

impl ServerSection {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// SQLite storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file, created on first start if missing
    pub path: PathBuf,
    pub max_connections: u32,
    /// How long a request waits for a pooled connection
    pub acquire_timeout_secs: u64,
    /// How long SQLite waits on a locked database before failing a statement
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("phonebook.db"),
            max_connections: 5,
            acquire_timeout_secs: 5,
            busy_timeout_secs: 5,
        }
    }
}

impl DatabaseConfig {
    /// Settings for a database file at `path`, everything else default
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

/// Settings for the `phonebook contacts` HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000".to_string(),
        }
    }
}

impl PhonebookConfig {
    /// Load config from `$PHONEBOOK_CONFIG` or ~/.phonebook/config.toml.
    ///
    /// A missing file yields defaults. Environment overrides and `${HOME}`
    /// expansion are applied afterwards.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_or_default(&Self::config_path())?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.expand_variables(&env::var("HOME").unwrap_or_default());
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load from `path`; the file must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PhonebookError::config_parse(path, e))
    }

    /// Get config file path: `$PHONEBOOK_CONFIG` or ~/.phonebook/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".phonebook/config.toml")
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.database.path = PathBuf::from(path);
        }

        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            self.server.bind = bind.parse().map_err(|_| {
                PhonebookError::config(format!("{BIND_ENV}={bind:?} is not a socket address"))
            })?;
        }

        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            self.client.endpoint = endpoint;
        }

        Ok(())
    }

    /// Expand `${HOME}` in the database path
    pub fn expand_variables(&mut self, home: &str) {
        let raw = self.database.path.display().to_string();
        if raw.contains("${HOME}") {
            self.database.path = PathBuf::from(raw.replace("${HOME}", home));
        }
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }
}
