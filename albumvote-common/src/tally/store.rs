//! Vote store
//!
//! Process-lifetime mapping from album identifier to vote count, guarded by a
//! single `RwLock`.
//!
//! - `increment` and `reset` take the write lock, so every increment is
//!   linearized either before or after a reset and none are lost.
//! - `snapshot` takes the read lock and copies the whole map before releasing
//!   it. Callers never see the live map.
//!
//! An identifier absent from the map has zero votes.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Point-in-time copy of the tally: album id -> vote count
pub type VoteTally = HashMap<String, u64>;

/// Shared vote counts
///
/// Constructed once at startup and shared through `Arc<VoteStore>` in the
/// application state. Tests build a fresh store per case.
#[derive(Debug, Default)]
pub struct VoteStore {
    counts: RwLock<VoteTally>,
}

impl VoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one vote for `id` and return the new count
    ///
    /// Never fails. Identifier validation is the caller's concern; any string
    /// is accepted as a key.
    pub async fn increment(&self, id: &str) -> u64 {
        let votes = {
            let mut counts = self.counts.write().await;
            let count = counts.entry(id.to_string()).or_insert(0);
            *count = count.saturating_add(1);
            *count
        };

        debug!(album_id = %id, votes, "Vote recorded");
        votes
    }

    /// Copy of all counts, taken under the read lock
    pub async fn snapshot(&self) -> VoteTally {
        self.counts.read().await.clone()
    }

    /// Current count for a single album (0 when never voted)
    pub async fn votes_for(&self, id: &str) -> u64 {
        self.counts.read().await.get(id).copied().unwrap_or(0)
    }

    /// Number of albums holding at least one vote
    pub async fn album_count(&self) -> usize {
        self.counts.read().await.len()
    }

    /// Discard all counts
    ///
    /// Returns how many album entries were dropped.
    pub async fn reset(&self) -> usize {
        let cleared = {
            let mut counts = self.counts.write().await;
            std::mem::take(&mut *counts).len()
        };

        debug!(cleared, "Vote tally reset");
        cleared
    }
}
