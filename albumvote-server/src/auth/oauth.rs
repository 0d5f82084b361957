//! OAuth authorization-code client
//!
//! Builds the provider authorize URL and exchanges authorization codes for
//! access tokens at the provider's token endpoint. Defaults target the
//! Spotify accounts service.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{OAuthError, SessionToken, TokenExchanger};
use albumvote_common::config::OAuthConfig;

const USER_AGENT: &str = concat!("albumvote/", env!("CARGO_PKG_VERSION"));
const TOKEN_TIMEOUT_SECS: u64 = 15;

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Authorization-code flow client
pub struct OAuthClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    authorize_url: Url,
    token_url: Url,
}

impl OAuthClient {
    /// Build a client from resolved OAuth settings
    ///
    /// Client id and secret must be present and both endpoint URLs must parse.
    pub fn from_config(config: &OAuthConfig) -> Result<Self, OAuthError> {
        let client_id = non_empty(config.client_id.as_deref())
            .ok_or_else(|| OAuthError::Config("client_id is not set".to_string()))?;
        let client_secret = non_empty(config.client_secret.as_deref())
            .ok_or_else(|| OAuthError::Config("client_secret is not set".to_string()))?;

        let authorize_url = Url::parse(&config.authorize_url)
            .map_err(|e| OAuthError::Config(format!("authorize_url: {}", e)))?;
        let token_url = Url::parse(&config.token_url)
            .map_err(|e| OAuthError::Config(format!("token_url: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TOKEN_TIMEOUT_SECS))
            .build()
            .map_err(|e| OAuthError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            authorize_url,
            token_url,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl TokenExchanger for OAuthClient {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("state", state);
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<SessionToken, OAuthError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        debug!(url = %self.token_url, "Exchanging authorization code");

        let response = self
            .http_client
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Token exchange rejected");
            return Err(OAuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::Parse(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(OAuthError::Parse("empty access_token".to_string()));
        }

        debug!(
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            expires_in = token.expires_in.unwrap_or(0),
            scope = token.scope.as_deref().unwrap_or(""),
            "Session token issued"
        );

        Ok(SessionToken::new(token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuthConfig {
        OAuthConfig {
            client_id: Some("my-client".to_string()),
            client_secret: Some("shh".to_string()),
            ..OAuthConfig::default()
        }
    }

    #[test]
    fn test_authorize_url_carries_flow_parameters() {
        let client = OAuthClient::from_config(&config()).unwrap();
        let url = Url::parse(&client.authorize_url("abc123")).unwrap();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("client_id"), Some("my-client"));
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(get("redirect_uri"), Some("http://localhost:8080/callback"));
        assert_eq!(get("scope"), Some("user-library-read"));
        assert_eq!(get("state"), Some("abc123"));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut cfg = config();
        cfg.client_secret = Some("  ".to_string());
        assert!(matches!(
            OAuthClient::from_config(&cfg),
            Err(OAuthError::Config(_))
        ));

        let mut cfg = config();
        cfg.client_id = None;
        assert!(matches!(
            OAuthClient::from_config(&cfg),
            Err(OAuthError::Config(_))
        ));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut cfg = config();
        cfg.token_url = "not a url".to_string();
        assert!(matches!(
            OAuthClient::from_config(&cfg),
            Err(OAuthError::Config(_))
        ));
    }
}
