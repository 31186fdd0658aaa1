/// Structured error types for phonebook-core.
///
/// Binary crates (phonebook-cli) wrap these with `anyhow`, library consumers
/// get structured, composable errors.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for phonebook-core operations
#[derive(Error, Debug)]
pub enum PhonebookError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be serialized back to TOML
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// Invalid configuration value
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for phonebook-core operations
pub type Result<T> = std::result::Result<T, PhonebookError>;

impl PhonebookError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
