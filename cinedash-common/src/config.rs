//! Configuration loading and resolution
//!
//! Each bootstrap setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: defaults are used and a warning is
//! logged. A config file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the store connection string
pub const ENV_DATABASE_URL: &str = "CINEDASH_DATABASE_URL";
/// Environment variable naming the listen host
pub const ENV_HOST: &str = "CINEDASH_HOST";
/// Environment variable naming the listen port
pub const ENV_PORT: &str = "CINEDASH_PORT";

/// Built-in defaults used when no other source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            database_url: "sqlite://movies.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8501,
            log_level: "info".to_string(),
        }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Bootstrap configuration loaded from TOML
///
/// Every field is optional; absent fields fall through to the defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Store connection string (sqlx URL)
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Explicit config file; when absent the platform default path is tried
    pub config_path: Option<PathBuf>,
}

/// Fully resolved dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl DashboardConfig {
    /// Resolve configuration from CLI overrides, environment, TOML and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let config_path = overrides.config_path.clone().or_else(default_config_path);
        let toml = match config_path {
            Some(path) => load_toml_config(&path)?.unwrap_or_default(),
            None => TomlConfig::default(),
        };

        Self::resolve_with(overrides, toml, CompiledDefaults::default())
    }

    /// Resolution with explicit TOML contents and defaults
    pub fn resolve_with(
        overrides: ConfigOverrides,
        toml: TomlConfig,
        defaults: CompiledDefaults,
    ) -> Result<Self> {
        let database_url = overrides
            .database_url
            .or_else(|| env_value(ENV_DATABASE_URL))
            .or(toml.database_url)
            .unwrap_or(defaults.database_url);

        if database_url.trim().is_empty() {
            return Err(Error::Config("database_url must not be empty".to_string()));
        }

        let host = overrides
            .host
            .or_else(|| env_value(ENV_HOST))
            .or(toml.host)
            .unwrap_or(defaults.host);

        let port = match overrides.port {
            Some(port) => port,
            None => match env_value(ENV_PORT) {
                Some(raw) => raw.parse::<u16>().map_err(|e| {
                    Error::Config(format!("Invalid {}='{}': {}", ENV_PORT, raw, e))
                })?,
                None => toml.port.unwrap_or(defaults.port),
            },
        };

        let log_level = toml.logging.level.unwrap_or(defaults.log_level);

        Ok(Self {
            database_url,
            host,
            port,
            log_level,
        })
    }

    /// `host:port` listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse a TOML config file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content).map_err(|e| {
        Error::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    info!("Loaded config file {}", path.display());
    Ok(Some(config))
}

/// Platform config path: `<config_dir>/cinedash/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinedash").join("config.toml"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
