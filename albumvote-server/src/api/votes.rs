//! Vote routes
//!
//! Voting is anonymous and unlimited, and identifiers are not checked against
//! any fetched catalog. Only the identifier's shape is validated.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use albumvote_common::{is_valid_album_id, top_n, RankedEntry, DEFAULT_TOP_N, MAX_ALBUM_ID_LEN};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Largest ranking served by the JSON API
pub const MAX_TOP_N: usize = 100;

/// Reject identifiers that could never come from the catalog
///
/// Same shape rule the fetcher applies to catalog albums, so every listed
/// album can be voted for.
pub fn validate_album_id(id: &str) -> ApiResult<()> {
    if is_valid_album_id(id) {
        return Ok(());
    }
    if id.is_empty() {
        return Err(ApiError::InvalidVoteTarget("album id is empty".to_string()));
    }
    if id.len() > MAX_ALBUM_ID_LEN {
        return Err(ApiError::InvalidVoteTarget(format!(
            "album id longer than {} characters",
            MAX_ALBUM_ID_LEN
        )));
    }
    Err(ApiError::InvalidVoteTarget(format!(
        "album id '{}' contains invalid characters",
        id
    )))
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub votes: u64,
}

#[derive(Debug, Serialize)]
pub struct AlbumVotesResponse {
    pub id: String,
    pub votes: u64,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<usize>,
}

/// POST /vote/:id
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> ApiResult<Json<VoteResponse>> {
    validate_album_id(&album_id)?;

    let votes = state.votes.increment(&album_id).await;
    info!(album_id = %album_id, votes, "Vote cast");

    Ok(Json(VoteResponse { votes }))
}

/// POST /vote/ and POST /vote
///
/// The `:id` segment never matches an empty id, so these arms report it.
pub async fn cast_empty_vote() -> ApiResult<Json<VoteResponse>> {
    Err(ApiError::InvalidVoteTarget("album id is empty".to_string()))
}

/// POST /reset
///
/// 303 back to the ranking.
pub async fn reset_votes(State(state): State<AppState>) -> Redirect {
    let cleared = state.votes.reset().await;
    info!(cleared, "Votes reset");
    Redirect::to("/top")
}

/// GET /api/top?n=
pub async fn top_json(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Json<Vec<RankedEntry>> {
    let n = query.n.unwrap_or(DEFAULT_TOP_N).min(MAX_TOP_N);
    let tally = state.votes.snapshot().await;
    Json(top_n(&tally, n))
}

/// GET /api/votes/:id
pub async fn album_votes(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> ApiResult<Json<AlbumVotesResponse>> {
    validate_album_id(&album_id)?;

    let votes = state.votes.votes_for(&album_id).await;
    Ok(Json(AlbumVotesResponse {
        id: album_id,
        votes,
    }))
}

/// Build vote routes
pub fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/vote", post(cast_empty_vote))
        .route("/vote/", post(cast_empty_vote))
        .route("/vote/:id", post(cast_vote))
        .route("/reset", post(reset_votes))
        .route("/api/top", get(top_json))
        .route("/api/votes/:id", get(album_votes))
}
