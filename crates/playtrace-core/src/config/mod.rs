//! Configuration management for PlayTrace.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `playtrace.toml` file
//! 3. User config `playtrace/config.toml` in the platform user config dir
//!    (e.g. `~/.config` on Linux, `~/Library/Application Support` on macOS)
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Logging configuration.
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./playtrace.toml` (project local)
    /// 2. `playtrace/config.toml` under the platform user config dir
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::parse_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::parse_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join(USER_CONFIG_DIR).join("config.toml"))
            .filter(|path| path.exists())
    }

    fn parse_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // Server overrides. PLAYTRACE_PORT wins over the bare PORT.
        if let Ok(host) = std::env::var("PLAYTRACE_HOST") {
            self.server.host = host;
        }
        for key in ["PORT", "PLAYTRACE_PORT"] {
            if let Ok(port) = std::env::var(key) {
                if let Ok(n) = port.parse() {
                    self.server.port = n;
                }
            }
        }
        if let Ok(dir) = std::env::var("PLAYTRACE_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }

        // Logging overrides
        if let Ok(level) = std::env::var("PLAYTRACE_LOG") {
            self.log.level = level;
        }
        if let Ok(format) = std::env::var("PLAYTRACE_LOG_FORMAT") {
            self.log.format = format;
        }
    }

    /// Check values that deserialize fine but are not usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_FORMATS.contains(&self.log.format.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log format '{}', expected one of: {}",
                self.log.format,
                LOG_FORMATS.join(", ")
            )));
        }
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid("server host is empty".to_string()));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Allow cross-origin requests from any origin.
    pub cors: bool,

    /// Directory holding the built browser client, served on non-API paths.
    pub static_dir: Option<PathBuf>,

    /// Open the browser once the server is listening.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: DEFAULT_CORS,
            static_dir: None,
            open_browser: DEFAULT_OPEN_BROWSER,
        }
    }
}

impl ServerConfig {
    /// The URL the server is reachable at.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "playtrace_core=debug".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format: "pretty" or "json".
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}
