//! Route definitions for events and registration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Public event routes mounted at `/events`.
///
/// ```text
/// GET  /                           -> list_events
/// GET  /upcoming                   -> upcoming_events
/// GET  /categories                 -> list_categories
/// GET  /slug/{slug}                -> get_event_by_slug
/// POST /{id}/registrations         -> register_for_event
/// GET  /{id}/registration-status   -> registration_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events))
        .route("/upcoming", get(events::upcoming_events))
        .route("/categories", get(events::list_categories))
        .route("/slug/{slug}", get(events::get_event_by_slug))
        .route("/{id}/registrations", post(events::register_for_event))
        .route(
            "/{id}/registration-status",
            get(events::registration_status),
        )
}

/// Admin event routes mounted at `/admin/events`.
///
/// ```text
/// POST /                     -> create_event
/// GET  /{id}/registrations   -> list_event_registrations
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(events::create_event))
        .route(
            "/{id}/registrations",
            get(events::list_event_registrations),
        )
}
