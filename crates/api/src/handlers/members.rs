//! Handlers for member registration and the member directory.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chapel_core::error::CoreError;
use chapel_db::models::member::CreateMember;
use chapel_db::models::validate_input;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/members
///
/// Register the signed-in user as a member. A `user_id` in the body, if
/// present, must match the token subject.
pub async fn register_member(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateMember>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    if let Some(claimed) = &input.user_id {
        if claimed != &user.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot register a member for another user".into(),
            )));
        }
    }

    let member = state.repos.members.register(&user.user_id, &input).await?;

    tracing::info!(member_id = member.id, user_id = %user.user_id, "Member registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// GET /api/v1/members/me
pub async fn current_member(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let member = state
        .repos
        .members
        .find_by_user_id(&user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Member",
                key: user.user_id.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: member }))
}

/// GET /api/v1/admin/members
pub async fn list_members(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state.repos.members.list(params.pagination()).await?;
    Ok(Json(DataResponse { data: page }))
}
