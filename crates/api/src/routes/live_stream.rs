//! Route definitions for the live stream.

use axum::routing::get;
use axum::Router;

use crate::handlers::live_stream;
use crate::state::AppState;

/// Public status route mounted at `/live-stream`.
///
/// ```text
/// GET /status   -> get_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(live_stream::get_status))
}

/// Stream settings mounted at `/admin/live-stream`.
///
/// ```text
/// GET /settings   -> get_settings
/// PUT /settings   -> update_settings
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(live_stream::get_settings).put(live_stream::update_settings),
    )
}
