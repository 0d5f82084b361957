//! Album and ranking models
//!
//! `AlbumRecord` comes from the catalog and is keyed by its opaque catalog
//! identifier. `RankedEntry` and `AlbumWithVotes` are derived views, rebuilt
//! from a tally snapshot on every request and never stored.

use serde::{Deserialize, Serialize};

/// Longest album identifier accepted as a tally key
pub const MAX_ALBUM_ID_LEN: usize = 64;

/// Catalog identifiers are base-62 strings of bounded length
pub fn is_valid_album_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_ALBUM_ID_LEN && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A saved album as normalized from the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRecord {
    /// Opaque catalog identifier (join key into the vote tally)
    pub id: String,
    /// Album title
    pub name: String,
    /// Primary artist name (empty when the catalog lists no artist)
    pub artist: String,
    /// Cover image URL (empty when the catalog provides no image)
    pub image_url: String,
}

impl AlbumRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            image_url: image_url.into(),
        }
    }
}

/// Album annotated with its current vote count, for the album list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumWithVotes {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub image_url: String,
    pub votes: u64,
}

impl AlbumWithVotes {
    pub fn from_record(album: &AlbumRecord, votes: u64) -> Self {
        Self {
            id: album.id.clone(),
            name: album.name.clone(),
            artist: album.artist.clone(),
            image_url: album.image_url.clone(),
            votes,
        }
    }
}

/// One row of the top-N ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub id: String,
    pub votes: u64,
}

impl RankedEntry {
    pub fn new(id: impl Into<String>, votes: u64) -> Self {
        Self {
            id: id.into(),
            votes,
        }
    }
}

/// Data handed to the album list view
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageData {
    pub albums: Vec<AlbumWithVotes>,
}
