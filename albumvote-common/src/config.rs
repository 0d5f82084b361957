//! Bootstrap configuration loading and config file resolution
//!
//! Settings are read once at startup from an optional TOML file. The server
//! layers command-line arguments and environment variables on top of it.
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config directory (`~/.config/albumvote/config.toml` on Linux)
//! 4. None (built-in defaults only)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Remote catalog API caps saved-album pages at 50 items
pub const MAX_PAGE_SIZE: usize = 50;

/// Bootstrap configuration loaded from TOML
///
/// Every section is optional. A missing file is the same as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub oauth: OAuthConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener and static asset settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// OAuth authorization-code flow settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthConfig {
    /// Client id issued by the identity provider
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client secret issued by the identity provider
    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Anti-forgery state sent with the authorize redirect and checked on callback
    #[serde(default = "default_state_token")]
    pub state_token: String,

    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: default_redirect_uri(),
            state_token: default_state_token(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            scope: default_scope(),
        }
    }
}

/// Remote catalog pagination settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Items requested per page (1..=50)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-page request timeout in seconds
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Extra attempts for a page after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on a whole catalog fetch, in seconds
    #[serde(default = "default_fetch_deadline_secs")]
    pub fetch_deadline_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            page_timeout_secs: default_page_timeout_secs(),
            max_retries: default_max_retries(),
            fetch_deadline_secs: default_fetch_deadline_secs(),
        }
    }
}

impl CatalogConfig {
    /// Reject settings the remote API or the fetcher cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "catalog.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.page_timeout_secs == 0 {
            return Err(Error::Config(
                "catalog.page_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.fetch_deadline_secs == 0 {
            return Err(Error::Config(
                "catalog.fetch_deadline_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_redirect_uri() -> String {
    "http://localhost:8080/callback".to_string()
}

fn default_state_token() -> String {
    "abc123".to_string()
}

fn default_authorize_url() -> String {
    "https://accounts.spotify.com/authorize".to_string()
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_scope() -> String {
    "user-library-read".to_string()
}

fn default_api_base_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_page_size() -> usize {
    MAX_PAGE_SIZE
}

fn default_page_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_fetch_deadline_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolve which config file to read, if any
///
/// Returns `None` when no candidate exists; callers then run on defaults.
/// An explicitly named file (argument or environment) is returned even if it
/// does not exist, so loading it reports the missing path.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path().filter(|path| path.exists())
}

/// Platform config file location (`<config_dir>/albumvote/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("albumvote").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let config: TomlConfig = toml::from_str(&content)?;
    config.catalog.validate()?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Load the resolved config file, or defaults when there is none
pub fn load_or_default(path: Option<&Path>) -> Result<TomlConfig> {
    match path {
        Some(path) => load_toml_config(path),
        None => {
            debug!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Write a config file, creating parent directories
///
/// Only the config round-trip tests write files today; the service itself
/// never rewrites its configuration.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
