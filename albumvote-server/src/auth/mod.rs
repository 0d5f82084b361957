//! OAuth session handling
//!
//! The identity provider exchange is a plain request/response: the callback
//! handler trades the authorization code for a [`SessionToken`] and hands the
//! token straight to the catalog fetcher. Nothing is stored between requests.

pub mod oauth;

pub use oauth::OAuthClient;

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Access token authorizing catalog reads for one session
///
/// Opaque to the rest of the service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self(access_token.into())
    }

    /// Raw bearer credential for outgoing catalog requests
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// OAuth errors
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Authorization denied by provider: {0}")]
    Denied(String),

    #[error("State token mismatch")]
    StateMismatch,

    #[error("Missing authorization code")]
    MissingCode,

    #[error("Token exchange rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid OAuth configuration: {0}")]
    Config(String),
}

/// Identity provider seam (authorization-code flow)
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Provider URL the login route redirects to
    fn authorize_url(&self, state: &str) -> String;

    /// Trade an authorization code for a session token
    async fn exchange_code(&self, code: &str) -> Result<SessionToken, OAuthError>;
}

/// Query parameters on the provider's redirect back to `/callback`
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Validate the redirect and return the authorization code
    ///
    /// A provider error, a missing or foreign state, or a missing code all
    /// fail the login.
    pub fn authorization_code(&self, expected_state: &str) -> Result<&str, OAuthError> {
        if let Some(error) = &self.error {
            return Err(OAuthError::Denied(error.clone()));
        }
        if self.state.as_deref() != Some(expected_state) {
            return Err(OAuthError::StateMismatch);
        }
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => Ok(code),
            _ => Err(OAuthError::MissingCode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(code: Option<&str>, state: Option<&str>, error: Option<&str>) -> CallbackParams {
        CallbackParams {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_callback_yields_code() {
        let p = params(Some("the-code"), Some("abc123"), None);
        assert_eq!(p.authorization_code("abc123").unwrap(), "the-code");
    }

    #[test]
    fn test_provider_error_wins() {
        let p = params(Some("the-code"), Some("abc123"), Some("access_denied"));
        assert!(matches!(
            p.authorization_code("abc123"),
            Err(OAuthError::Denied(e)) if e == "access_denied"
        ));
    }

    #[test]
    fn test_state_mismatch() {
        let p = params(Some("the-code"), Some("forged"), None);
        assert!(matches!(p.authorization_code("abc123"), Err(OAuthError::StateMismatch)));

        let p = params(Some("the-code"), None, None);
        assert!(matches!(p.authorization_code("abc123"), Err(OAuthError::StateMismatch)));
    }

    #[test]
    fn test_missing_code() {
        let p = params(Some(""), Some("abc123"), None);
        assert!(matches!(p.authorization_code("abc123"), Err(OAuthError::MissingCode)));
    }

    #[test]
    fn test_session_token_debug_is_redacted() {
        let token = SessionToken::new("BQD-very-secret");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
        assert_eq!(token.secret(), "BQD-very-secret");
    }
}
