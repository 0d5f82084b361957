//! # Album Vote Common Library
//!
//! Shared code for the album vote service:
//! - Album and ranking models
//! - Vote tally store and top-N ranking
//! - Presentation adapter joining catalog albums with vote counts
//! - Bootstrap configuration loading

pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod tally;

pub use error::{Error, Result};
pub use models::{
    is_valid_album_id, AlbumRecord, AlbumWithVotes, PageData, RankedEntry, MAX_ALBUM_ID_LEN,
};
pub use presentation::annotate;
pub use tally::{top_n, VoteStore, VoteTally, DEFAULT_TOP_N};
