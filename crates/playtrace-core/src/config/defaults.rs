//! Default values for PlayTrace configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Server Defaults
// ============================================================================

/// Address the API server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the API server listens on.
pub const DEFAULT_PORT: u16 = 3001;

/// Whether cross-origin requests are allowed.
pub const DEFAULT_CORS: bool = true;

/// Whether to open the browser when the server starts.
pub const DEFAULT_OPEN_BROWSER: bool = false;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log output format.
pub const DEFAULT_LOG_FORMAT: &str = "pretty";

/// Accepted log output formats.
pub const LOG_FORMATS: &[&str] = &["pretty", "json"];

// ============================================================================
// File Locations
// ============================================================================

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "playtrace.toml";

/// Directory under the user config dir holding `config.toml`.
pub const USER_CONFIG_DIR: &str = "playtrace";

// ============================================================================
// API Messages
// ============================================================================

/// Message returned by the health endpoint.
pub const HEALTH_MESSAGE: &str = "PlayTrace QA Tool API is running";
