//! Handlers for prayer requests: public submission and wall, admin moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chapel_core::error::CoreError;
use chapel_core::types::DbId;
use chapel_db::models::prayer_request::CreatePrayerRequest;
use chapel_db::models::validate_input;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn prayer_request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PrayerRequest",
        id,
    })
}

/// POST /api/v1/prayer-requests
///
/// New requests wait for approval before appearing on the public wall.
pub async fn submit_prayer_request(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePrayerRequest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let request = state
        .repos
        .prayer_requests
        .submit(caller.user_id(), &input)
        .await?;

    tracing::info!(
        prayer_request_id = request.id,
        is_private = request.is_private,
        "Prayer request submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/prayer-requests
///
/// Approved, non-private requests without contact details.
pub async fn list_public_prayer_requests(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .repos
        .prayer_requests
        .list_public(params.pagination())
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/prayer-requests
pub async fn list_all_prayer_requests(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .repos
        .prayer_requests
        .list_all(params.pagination())
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/admin/prayer-requests/{id}/approve
pub async fn approve_prayer_request(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state
        .repos
        .prayer_requests
        .approve(request_id)
        .await?
        .ok_or_else(|| prayer_request_not_found(request_id))?;

    tracing::info!(
        prayer_request_id = request_id,
        user_id = %admin.user_id,
        "Prayer request approved",
    );

    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/admin/prayer-requests/{id}/answered
pub async fn mark_prayer_request_answered(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state
        .repos
        .prayer_requests
        .mark_answered(request_id)
        .await?
        .ok_or_else(|| prayer_request_not_found(request_id))?;

    tracing::info!(
        prayer_request_id = request_id,
        user_id = %admin.user_id,
        "Prayer request marked answered",
    );

    Ok(Json(DataResponse { data: request }))
}
