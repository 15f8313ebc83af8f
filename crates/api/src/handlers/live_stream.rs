//! Handlers for live-stream status and the admin stream settings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chapel_core::live_stream::{
    playback_url, resolve, validate_bitrate, validate_resolution, validate_visibility,
    StreamState,
};
use chapel_core::types::Timestamp;
use chapel_db::models::live_stream::UpdateLiveStreamSettings;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Public view of the stream at the moment of the request.
#[derive(Debug, Serialize)]
pub struct LiveStreamStatus {
    /// `"live"` or `"offline"`.
    pub status: &'static str,
    pub is_live: bool,
    pub stream_id: String,
    pub playback_url: String,
    /// Start of the current window when live, otherwise of the next one.
    pub next_service_time: Timestamp,
    /// End of the current window; absent while offline.
    pub ends_at: Option<Timestamp>,
    pub title: String,
    pub description: String,
}

/// GET /api/v1/live-stream/status
pub async fn get_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = state.repos.live_stream.settings().await?;
    let config = &state.config.live_stream;
    let stream = resolve(Utc::now(), &config.window);

    let (next_service_time, ends_at) = match stream {
        StreamState::Live {
            started_at,
            ends_at,
        } => (started_at, Some(ends_at)),
        StreamState::Offline { next_start } => (next_start, None),
    };

    Ok(Json(DataResponse {
        data: LiveStreamStatus {
            status: stream.label(),
            is_live: stream.is_live(),
            playback_url: playback_url(&config.playback_base, &settings.stream_id),
            stream_id: settings.stream_id,
            next_service_time,
            ends_at,
            title: settings.title,
            description: settings.description,
        },
    }))
}

/// GET /api/v1/admin/live-stream/settings
pub async fn get_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = state.repos.live_stream.settings().await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/live-stream/settings
///
/// Partial update of the single settings record.
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateLiveStreamSettings>,
) -> AppResult<impl IntoResponse> {
    validate_settings(&input)?;

    let settings = state.repos.live_stream.update_settings(&input).await?;

    tracing::info!(
        stream_id = %settings.stream_id,
        resolution = %settings.resolution,
        user_id = %admin.user_id,
        "Live stream settings updated",
    );

    Ok(Json(DataResponse { data: settings }))
}

fn validate_settings(input: &UpdateLiveStreamSettings) -> Result<(), AppError> {
    if input.stream_id.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest("stream_id must not be empty".into()));
    }
    if input.title.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    if let Some(resolution) = &input.resolution {
        validate_resolution(resolution)?;
    }
    if let Some(visibility) = &input.default_visibility {
        validate_visibility(visibility)?;
    }
    if let Some(kbps) = input.max_bitrate_kbps {
        validate_bitrate(kbps)?;
    }
    Ok(())
}
