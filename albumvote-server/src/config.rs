//! Service settings resolution
//!
//! Merges command-line/environment overrides with the bootstrap TOML file.
//! Priority: CLI argument → environment variable (both via clap) → TOML →
//! built-in default.

use std::path::PathBuf;
use std::time::Duration;

use albumvote_common::config::{OAuthConfig, TomlConfig};
use albumvote_common::Result;

use crate::catalog::FetchOptions;

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one service run
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub oauth: OAuthConfig,
    pub api_base_url: String,
    pub fetch: FetchOptions,
    pub fetch_deadline: Duration,
    pub log_level: String,
}

impl ServiceSettings {
    pub fn resolve(overrides: &CliOverrides, toml: TomlConfig) -> Result<Self> {
        toml.catalog.validate()?;

        let mut oauth = toml.oauth;
        if let Some(client_id) = &overrides.client_id {
            oauth.client_id = Some(client_id.clone());
        }
        if let Some(client_secret) = &overrides.client_secret {
            oauth.client_secret = Some(client_secret.clone());
        }

        Ok(Self {
            host: overrides.host.clone().unwrap_or(toml.server.host),
            port: overrides.port.unwrap_or(toml.server.port),
            static_dir: overrides
                .static_dir
                .clone()
                .unwrap_or(toml.server.static_dir),
            oauth,
            api_base_url: toml.catalog.api_base_url.clone(),
            fetch: FetchOptions::from_config(&toml.catalog),
            fetch_deadline: Duration::from_secs(toml.catalog.fetch_deadline_secs),
            log_level: overrides
                .log_level
                .clone()
                .unwrap_or(toml.logging.level),
        })
    }

    /// Listener address as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Anti-forgery state carried through the OAuth redirect
    pub fn state_token(&self) -> &str {
        &self.oauth.state_token
    }
}
