//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Days counted as "recent" for new members and sermons.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Headline figures shown on the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub new_members: i64,
    pub upcoming_events: i64,
    pub next_event_name: Option<String>,
    pub recent_sermons: i64,
    pub total_views: i64,
    pub prayer_requests: i64,
    pub pending_requests: i64,
}

/// GET /api/v1/admin/dashboard/stats
pub async fn dashboard_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let since = now - Duration::days(RECENT_WINDOW_DAYS);
    let repos = &state.repos;

    let (members, events, sermons, prayer) = tokio::try_join!(
        repos.members.stats(since),
        repos.events.stats(now),
        repos.sermons.stats(since),
        repos.prayer_requests.stats(),
    )?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            total_members: members.total_members,
            new_members: members.new_members,
            upcoming_events: events.upcoming_events,
            next_event_name: events.next_event_name,
            recent_sermons: sermons.recent_sermons,
            total_views: sermons.total_views,
            prayer_requests: prayer.prayer_requests,
            pending_requests: prayer.pending_requests,
        },
    }))
}
