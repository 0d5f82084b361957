//! Spotify Web API page source
//!
//! `GET {api_base_url}/me/albums?limit=..&offset=..` with the session's
//! bearer token.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::{AlbumPageSource, PageError, SavedAlbumItem, SavedAlbumPage};
use crate::auth::SessionToken;

const USER_AGENT: &str = concat!("albumvote/", env!("CARGO_PKG_VERSION"));

/// Saved-album reader for the Spotify Web API
pub struct SpotifyCatalog {
    http_client: reqwest::Client,
    api_base_url: String,
}

impl SpotifyCatalog {
    /// Per-request timeouts are applied by the fetcher, not the HTTP client.
    pub fn new(api_base_url: &str) -> Result<Self, PageError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PageError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn saved_albums_url(&self) -> String {
        format!("{}/me/albums", self.api_base_url)
    }
}

#[async_trait]
impl AlbumPageSource for SpotifyCatalog {
    async fn fetch_page(
        &self,
        session: &SessionToken,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SavedAlbumItem>, PageError> {
        let url = self.saved_albums_url();
        debug!(url = %url, offset, limit, "Requesting saved albums page");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(session.secret())
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PageError::Timeout
                } else {
                    PageError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PageError::Unauthorized(status.as_u16()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PageError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PageError::Api(status.as_u16(), error_text));
        }

        let page: SavedAlbumPage = response
            .json()
            .await
            .map_err(|e| PageError::Parse(e.to_string()))?;

        Ok(page.items)
    }
}
