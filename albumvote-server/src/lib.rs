//! albumvote-server library
//!
//! HTTP service around the vote tally: OAuth login, saved-album listing,
//! voting and the top albums ranking. Exposed as a library so integration
//! tests can drive the router with stub collaborators.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod views;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use albumvote_common::VoteStore;
use auth::TokenExchanger;
use catalog::{AlbumPageSource, FetchOptions};
use config::ServiceSettings;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The process-wide vote tally
    pub votes: Arc<VoteStore>,
    /// Identity provider (authorization-code exchange)
    pub oauth: Arc<dyn TokenExchanger>,
    /// Saved-album page source
    pub catalog: Arc<dyn AlbumPageSource>,
    /// Anti-forgery state for the OAuth redirect
    pub state_token: String,
    /// Pagination and retry settings for catalog fetches
    pub fetch_options: FetchOptions,
    /// Upper bound on one whole catalog fetch
    pub fetch_deadline: Duration,
    /// Directory served under /static
    pub static_dir: PathBuf,
    /// Cancelled on shutdown; in-flight catalog fetches use child tokens
    pub shutdown: CancellationToken,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        settings: &ServiceSettings,
        votes: Arc<VoteStore>,
        oauth: Arc<dyn TokenExchanger>,
        catalog: Arc<dyn AlbumPageSource>,
    ) -> Self {
        Self {
            votes,
            oauth,
            catalog,
            state_token: settings.state_token().to_string(),
            fetch_options: settings.fetch.clone(),
            fetch_deadline: settings.fetch_deadline,
            static_dir: settings.static_dir.clone(),
            shutdown: CancellationToken::new(),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .merge(api::page_routes())
        .merge(api::vote_routes())
        .merge(api::health_routes())
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
