//! HTML page routes: landing, OAuth login/callback and the top albums view

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use tracing::{info, warn};

use albumvote_common::{annotate, top_n, PageData, DEFAULT_TOP_N};

use crate::auth::CallbackParams;
use crate::catalog::fetch_saved_albums;
use crate::error::{ApiError, ApiResult};
use crate::views;
use crate::AppState;

/// GET /
pub async fn home() -> Html<String> {
    Html(views::render_landing())
}

/// GET /login
///
/// 307 to the provider's authorize URL carrying the fixed state token.
pub async fn login(State(state): State<AppState>) -> Redirect {
    let url = state.oauth.authorize_url(&state.state_token);
    info!("Redirecting to identity provider for login");
    Redirect::temporary(&url)
}

/// GET /callback
///
/// Exchanges the authorization code, fetches every saved album for the new
/// session and renders them with current vote counts. The session token only
/// lives for the duration of this request.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> ApiResult<Html<String>> {
    let code = params.authorization_code(&state.state_token)?;
    let session = state.oauth.exchange_code(code).await?;
    info!("Login succeeded, fetching saved albums");

    let cancel = state.shutdown.child_token();
    let fetch = fetch_saved_albums(
        state.catalog.as_ref(),
        &session,
        &state.fetch_options,
        &cancel,
    );

    let albums = match tokio::time::timeout(state.fetch_deadline, fetch).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(deadline = ?state.fetch_deadline, "Catalog fetch exceeded deadline");
            return Err(ApiError::Cancelled);
        }
    };

    let tally = state.votes.snapshot().await;
    let data = PageData {
        albums: annotate(&albums, &tally),
    };

    Ok(Html(views::render_albums(&data)))
}

/// GET /top
pub async fn top_page(State(state): State<AppState>) -> Html<String> {
    let tally = state.votes.snapshot().await;
    let ranked = top_n(&tally, DEFAULT_TOP_N);
    Html(views::render_top(&ranked))
}

/// Build page routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/top", get(top_page))
}
