use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{env, fs, num::ParseIntError, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PostgreSQL DSN; absent or blank keeps notes in memory
    pub database_dsn: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_dsn: None,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    /// The DSN to hand to the store, with blanks treated as absent.
    pub fn storage_location(&self) -> Option<&str> {
        self.database_dsn
            .as_deref()
            .map(str::trim)
            .filter(|dsn| !dsn.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse NOTES_PORT {value:?}: {source}")]
    Port {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Loads the YAML file named by `NOTES_CONFIG` (default `config.yaml`) if it
/// exists, otherwise falls back to `NOTES_*` environment variables.
///
/// # Errors
///
/// Fails on an unreadable or malformed config file, or a non-numeric port.
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = env::var("NOTES_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    if Path::new(&config_path).exists() {
        tracing::info!("Loading config from '{}'", config_path);
        return load_from_file(&config_path);
    }

    tracing::info!(
        "Config file '{}' not found, loading configuration from environment variables",
        config_path
    );
    load_from_vars(|key| env::var(key).ok())
}

/// # Errors
///
/// Fails if the file cannot be read or is not valid YAML for `Config`.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

/// Builds a config from `NOTES_DATABASE_DSN`, `NOTES_HOST` and `NOTES_PORT`
/// as returned by `lookup`. Unset variables keep their defaults.
///
/// # Errors
///
/// Fails if `NOTES_PORT` is set but is not a valid port number.
pub fn load_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let mut config = Config {
        database_dsn: lookup("NOTES_DATABASE_DSN"),
        ..Config::default()
    };

    if let Some(host) = lookup("NOTES_HOST") {
        config.host = host;
    }

    if let Some(value) = lookup("NOTES_PORT") {
        config.port = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::Port { value, source })?;
    }

    Ok(config)
}
