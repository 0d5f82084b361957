//! In-memory vote tally and ranking
//!
//! The [`VoteStore`] is the single piece of shared mutable state in the
//! service. Everything else works on snapshots copied out of it.

pub mod ranking;
pub mod store;

pub use ranking::{top_n, DEFAULT_TOP_N};
pub use store::{VoteStore, VoteTally};
