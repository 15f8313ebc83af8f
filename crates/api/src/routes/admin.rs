//! Route definitions for the back office.
//!
//! Sermon management requires the `editor` or `admin` role; everything else
//! requires `admin`.

use axum::routing::get;
use axum::Router;

use super::{events, live_stream, members, prayer_requests};
use crate::handlers::{dashboard, sermons};
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard/stats   -> dashboard_stats
/// GET    /sermons           -> admin_list_sermons
/// POST   /sermons           -> create_sermon
/// GET    /sermons/{id}      -> get_sermon
/// PUT    /sermons/{id}      -> update_sermon
/// DELETE /sermons/{id}      -> delete_sermon
/// /events/...               -> events::admin_router
/// /members/...              -> members::admin_router
/// /prayer-requests/...      -> prayer_requests::admin_router
/// /live-stream/...          -> live_stream::admin_router
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .route(
            "/sermons",
            get(sermons::admin_list_sermons).post(sermons::create_sermon),
        )
        .route(
            "/sermons/{id}",
            get(sermons::get_sermon)
                .put(sermons::update_sermon)
                .delete(sermons::delete_sermon),
        )
        .nest("/events", events::admin_router())
        .nest("/members", members::admin_router())
        .nest("/prayer-requests", prayer_requests::admin_router())
        .nest("/live-stream", live_stream::admin_router())
}
