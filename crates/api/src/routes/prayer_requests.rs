//! Route definitions for prayer requests.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prayer_requests;
use crate::state::AppState;

/// Public prayer wall mounted at `/prayer-requests`.
///
/// ```text
/// GET  /   -> list_public_prayer_requests
/// POST /   -> submit_prayer_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(prayer_requests::list_public_prayer_requests)
            .post(prayer_requests::submit_prayer_request),
    )
}

/// Moderation routes mounted at `/admin/prayer-requests`.
///
/// ```text
/// GET  /                -> list_all_prayer_requests
/// POST /{id}/approve    -> approve_prayer_request
/// POST /{id}/answered   -> mark_prayer_request_answered
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(prayer_requests::list_all_prayer_requests))
        .route("/{id}/approve", post(prayer_requests::approve_prayer_request))
        .route(
            "/{id}/answered",
            post(prayer_requests::mark_prayer_request_answered),
        )
}
