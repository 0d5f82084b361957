//! Saved-album pagination
//!
//! Pages are requested one after another at increasing offsets. A page with
//! fewer items than the page size is the last one, so an exactly-full final
//! page costs one extra request that comes back empty.
//!
//! Any page failure aborts the whole fetch and drops what was collected so
//! far. Transient failures (network, timeout, 429, 5xx) are retried a bounded
//! number of times first.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{AlbumPageSource, CatalogError, PageError, SavedAlbumItem};
use crate::auth::SessionToken;
use albumvote_common::config::CatalogConfig;
use albumvote_common::{is_valid_album_id, AlbumRecord};

/// Pagination and retry settings for one fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Items requested per page
    pub page_size: usize,
    /// Bound on each page request
    pub page_timeout: Duration,
    /// Extra attempts per page after a transient failure
    pub max_retries: u32,
    /// Base delay between attempts, multiplied by the attempt number
    pub retry_backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: 50,
            page_timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl FetchOptions {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            page_size: config.page_size,
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            max_retries: config.max_retries,
            ..Self::default()
        }
    }
}

/// Fetch every saved album for the session
///
/// Returns the complete, normalized list or an error. Never a partial list.
pub async fn fetch_saved_albums(
    source: &dyn AlbumPageSource,
    session: &SessionToken,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<AlbumRecord>, CatalogError> {
    let page_size = options.page_size.max(1);
    let mut albums = Vec::new();
    let mut offset = 0;
    let mut pages = 0;

    loop {
        let items = fetch_page_with_retry(source, session, offset, page_size, options, cancel).await?;
        pages += 1;

        let received = items.len();
        for item in items {
            let album = normalize_item(item)
                .map_err(|cause| CatalogError::FetchFailed { offset, cause })?;
            albums.push(album);
        }

        debug!(offset, received, "Catalog page received");

        if received < page_size {
            break;
        }
        offset += page_size;
    }

    info!(albums = albums.len(), pages, "Catalog fetch complete");
    Ok(albums)
}

async fn fetch_page_with_retry(
    source: &dyn AlbumPageSource,
    session: &SessionToken,
    offset: usize,
    page_size: usize,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<SavedAlbumItem>, CatalogError> {
    let mut attempt: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        let request = tokio::time::timeout(
            options.page_timeout,
            source.fetch_page(session, offset, page_size),
        );

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
            result = request => result.unwrap_or(Err(PageError::Timeout)),
        };

        match outcome {
            Ok(items) => return Ok(items),
            Err(cause) if cause.is_transient() && attempt < options.max_retries => {
                attempt += 1;
                warn!(
                    offset,
                    attempt,
                    max_retries = options.max_retries,
                    "Catalog page failed, retrying: {}",
                    cause
                );

                tokio::select! {
                    _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
                    _ = tokio::time::sleep(options.retry_backoff * attempt) => {}
                }
            }
            Err(cause) => return Err(CatalogError::FetchFailed { offset, cause }),
        }
    }
}

/// Convert a remote saved-album entry into an [`AlbumRecord`]
///
/// The identifier must pass [`is_valid_album_id`], the same check votes are
/// held to. Missing artists or images become empty strings.
pub fn normalize_item(item: SavedAlbumItem) -> Result<AlbumRecord, PageError> {
    let album = item.album;

    let id = album
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| PageError::InvalidItem(format!("album '{}' has no id", album.name)))?;
    if !is_valid_album_id(&id) {
        return Err(PageError::InvalidItem(format!(
            "album '{}' has malformed id '{}'",
            album.name, id
        )));
    }

    let artist = album
        .artists
        .into_iter()
        .next()
        .map(|a| a.name)
        .unwrap_or_default();

    let image_url = album
        .images
        .into_iter()
        .next()
        .map(|i| i.url)
        .unwrap_or_default();

    Ok(AlbumRecord {
        id,
        name: album.name,
        artist,
        image_url,
    })
}
