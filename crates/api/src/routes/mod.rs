pub mod admin;
pub mod events;
pub mod health;
pub mod live_stream;
pub mod members;
pub mod prayer_requests;
pub mod sermons;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sermons                                    list (search, speaker, series, topic, sort, order, page, per_page)
/// /sermons/latest                             newest published (?limit)
/// /sermons/speakers                           speaker facet
/// /sermons/series                             series facet
/// /sermons/topics                             topic facet
/// /sermons/slug/{slug}                        detail, counts a view
/// /sermons/{id}/related                       related sermons (?limit)
/// /sermons/{id}/downloads                     count a download (POST)
///
/// /events                                     list (?page, per_page, category)
/// /events/upcoming                            upcoming (?limit)
/// /events/categories                          category facet
/// /events/slug/{slug}                         detail
/// /events/{id}/registrations                  register (POST, optional auth)
/// /events/{id}/registration-status            is ?email registered
///
/// /prayer-requests                            public wall, submit (GET, POST)
///
/// /members                                    register current user (POST, auth)
/// /members/me                                 current member (auth)
///
/// /live-stream/status                         live/offline status
///
/// /admin/dashboard/stats                      headline figures (admin)
/// /admin/sermons                              list incl. drafts, create (editor)
/// /admin/sermons/{id}                         get, update, delete (editor)
/// /admin/events                               create (admin)
/// /admin/events/{id}/registrations            attendee list (admin)
/// /admin/members                              member directory (admin)
/// /admin/prayer-requests                      all requests (admin)
/// /admin/prayer-requests/{id}/approve         approve (POST, admin)
/// /admin/prayer-requests/{id}/answered        mark answered (POST, admin)
/// /admin/live-stream/settings                 get, update (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public sermon archive.
        .nest("/sermons", sermons::router())
        // Events and registration.
        .nest("/events", events::router())
        // Prayer wall.
        .nest("/prayer-requests", prayer_requests::router())
        // Member self-service.
        .nest("/members", members::router())
        // Live stream status.
        .nest("/live-stream", live_stream::router())
        // Back office (role checks live in the handlers' extractors).
        .nest("/admin", admin::router())
}
