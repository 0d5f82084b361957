//! Remote catalog access
//!
//! - [`AlbumPageSource`]: one page of the user's saved albums (trait seam)
//! - [`SpotifyCatalog`]: Web API implementation over reqwest
//! - [`fetch_saved_albums`]: sequential pagination, normalization, retries
//!   and cancellation

pub mod fetcher;
pub mod spotify;

pub use fetcher::{fetch_saved_albums, normalize_item, FetchOptions};
pub use spotify::SpotifyCatalog;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::SessionToken;

/// Failure of a single page request
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Not authorized ({0})")]
    Unauthorized(u16),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid catalog item: {0}")]
    InvalidItem(String),
}

impl PageError {
    /// Whether another attempt at the same page could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            PageError::Network(_) | PageError::Timeout | PageError::RateLimited => true,
            PageError::Api(status, _) => *status >= 500,
            PageError::Unauthorized(_) | PageError::Parse(_) | PageError::InvalidItem(_) => false,
        }
    }
}

/// Whole-fetch failure; partial results are never returned
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog fetch failed at offset {offset}: {cause}")]
    FetchFailed { offset: usize, cause: PageError },

    #[error("Catalog fetch cancelled")]
    Cancelled,
}

/// Saved-album page as returned by the catalog API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedAlbumPage {
    #[serde(default)]
    pub items: Vec<SavedAlbumItem>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One saved album entry
#[derive(Debug, Clone, Deserialize)]
pub struct SavedAlbumItem {
    #[serde(default)]
    pub added_at: Option<String>,
    pub album: RemoteAlbum,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteAlbum {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RemoteArtist>,
    #[serde(default)]
    pub images: Vec<RemoteImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl SavedAlbumItem {
    /// Build an item from plain fields (stubs and tests)
    pub fn new(id: &str, name: &str, artists: &[&str], images: &[&str]) -> Self {
        Self {
            added_at: None,
            album: RemoteAlbum {
                id: Some(id.to_string()),
                name: name.to_string(),
                artists: artists
                    .iter()
                    .map(|a| RemoteArtist {
                        name: a.to_string(),
                    })
                    .collect(),
                images: images
                    .iter()
                    .map(|u| RemoteImage {
                        url: u.to_string(),
                        width: None,
                        height: None,
                    })
                    .collect(),
            },
        }
    }
}

/// Source of saved-album pages for an authenticated session
#[async_trait]
pub trait AlbumPageSource: Send + Sync {
    /// Fetch up to `limit` saved albums starting at `offset`
    async fn fetch_page(
        &self,
        session: &SessionToken,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SavedAlbumItem>, PageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_web_api_shape() {
        let json = r#"{
            "href": "https://api.spotify.com/v1/me/albums?offset=0&limit=50",
            "limit": 50,
            "next": null,
            "offset": 0,
            "total": 1,
            "items": [{
                "added_at": "2024-03-01T10:00:00Z",
                "album": {
                    "id": "2up3OPMp9Tb4dAKM2erWXQ",
                    "name": "Kind of Blue",
                    "album_type": "album",
                    "artists": [{"id": "0kbYTNQb4Pb1rPbbaF0pT4", "name": "Miles Davis"}],
                    "images": [
                        {"url": "https://i.scdn.co/image/large", "width": 640, "height": 640},
                        {"url": "https://i.scdn.co/image/small", "width": 64, "height": 64}
                    ]
                }
            }]
        }"#;

        let page: SavedAlbumPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, Some(1));
        assert_eq!(page.items.len(), 1);
        let album = &page.items[0].album;
        assert_eq!(album.id.as_deref(), Some("2up3OPMp9Tb4dAKM2erWXQ"));
        assert_eq!(album.artists[0].name, "Miles Davis");
        assert_eq!(album.images[0].width, Some(640));
    }

    #[test]
    fn test_transient_classification() {
        assert!(PageError::Timeout.is_transient());
        assert!(PageError::RateLimited.is_transient());
        assert!(PageError::Network("reset".into()).is_transient());
        assert!(PageError::Api(503, String::new()).is_transient());
        assert!(!PageError::Api(404, String::new()).is_transient());
        assert!(!PageError::Unauthorized(401).is_transient());
        assert!(!PageError::Parse("bad".into()).is_transient());
    }
}
