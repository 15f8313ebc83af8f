//! Route definitions for the public sermon archive.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sermons;
use crate::state::AppState;

/// Public sermon routes mounted at `/sermons`.
///
/// ```text
/// GET  /                -> list_sermons
/// GET  /latest          -> latest_sermons
/// GET  /speakers        -> list_speakers
/// GET  /series          -> list_series
/// GET  /topics          -> list_topics
/// GET  /slug/{slug}     -> get_sermon_by_slug
/// GET  /{id}/related    -> related_sermons
/// POST /{id}/downloads  -> record_download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sermons::list_sermons))
        .route("/latest", get(sermons::latest_sermons))
        .route("/speakers", get(sermons::list_speakers))
        .route("/series", get(sermons::list_series))
        .route("/topics", get(sermons::list_topics))
        .route("/slug/{slug}", get(sermons::get_sermon_by_slug))
        .route("/{id}/related", get(sermons::related_sermons))
        .route("/{id}/downloads", post(sermons::record_download))
}
