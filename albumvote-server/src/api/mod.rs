//! HTTP API handlers for albumvote-server

pub mod health;
pub mod pages;
pub mod votes;

pub use health::health_routes;
pub use pages::page_routes;
pub use votes::{validate_album_id, vote_routes};
