//! Handlers for sermons: the public archive and editor-only management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chapel_core::content::{
    normalize_tags, slugify, validate_sermon_status, validate_slug, STATUS_PUBLISHED,
};
use chapel_core::error::CoreError;
use chapel_core::sermon_query::{SermonListParams, SermonQuery};
use chapel_core::types::DbId;
use chapel_db::models::sermon::{CreateSermon, Sermon, UpdateSermon};
use chapel_db::models::validate_input;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum size of the "latest sermons" strip.
const LATEST_DEFAULT: i64 = 3;
const LATEST_MAX: i64 = 12;

/// Default and maximum number of related sermons.
const RELATED_DEFAULT: i64 = 3;
const RELATED_MAX: i64 = 12;

fn sermon_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Sermon",
        id,
    })
}

// ---------------------------------------------------------------------------
// Public archive
// ---------------------------------------------------------------------------

/// GET /api/v1/sermons
///
/// Filtered, sorted, paginated list of published sermons. Unknown sort keys
/// and empty filters are ignored.
pub async fn list_sermons(
    State(state): State<AppState>,
    Query(params): Query<SermonListParams>,
) -> AppResult<impl IntoResponse> {
    let query = SermonQuery::from_params(&params);
    let page = state.repos.sermons.list(&query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/sermons/latest
pub async fn latest_sermons(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit(LATEST_DEFAULT, LATEST_MAX);
    let sermons = state.repos.sermons.latest(limit).await?;
    Ok(Json(DataResponse { data: sermons }))
}

/// GET /api/v1/sermons/speakers
pub async fn list_speakers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let speakers = state.repos.sermons.speakers().await?;
    Ok(Json(DataResponse { data: speakers }))
}

/// GET /api/v1/sermons/series
pub async fn list_series(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let series = state.repos.sermons.series().await?;
    Ok(Json(DataResponse { data: series }))
}

/// GET /api/v1/sermons/topics
pub async fn list_topics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let topics = state.repos.sermons.topics().await?;
    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/v1/sermons/slug/{slug}
///
/// Published sermon detail. Each successful fetch counts as one view.
pub async fn get_sermon_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let sermon = state
        .repos
        .sermons
        .view_by_slug(&slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Sermon",
                key: slug.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: sermon }))
}

/// GET /api/v1/sermons/{id}/related
///
/// Sermons from the same series first, topped up with the newest other
/// published sermons.
pub async fn related_sermons(
    State(state): State<AppState>,
    Path(sermon_id): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit(RELATED_DEFAULT, RELATED_MAX);
    let sermons = &state.repos.sermons;

    let sermon = sermons
        .find_by_id(sermon_id)
        .await?
        .filter(|s| s.status == STATUS_PUBLISHED)
        .ok_or_else(|| sermon_not_found(sermon_id))?;

    let mut related: Vec<Sermon> = match sermon.series.as_deref() {
        Some(series) => sermons.related(sermon_id, Some(series), limit).await?,
        None => Vec::new(),
    };

    if (related.len() as i64) < limit {
        for candidate in sermons.related(sermon_id, None, limit).await? {
            if related.len() as i64 >= limit {
                break;
            }
            if !related.iter().any(|r| r.id == candidate.id) {
                related.push(candidate);
            }
        }
    }

    Ok(Json(DataResponse { data: related }))
}

/// POST /api/v1/sermons/{id}/downloads
///
/// Count one download of the sermon's audio. Returns 204.
pub async fn record_download(
    State(state): State<AppState>,
    Path(sermon_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.repos.sermons.increment_downloads(sermon_id).await? {
        return Err(sermon_not_found(sermon_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Editor management
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/sermons
///
/// Same filters as the public list, drafts included.
pub async fn admin_list_sermons(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<SermonListParams>,
) -> AppResult<impl IntoResponse> {
    let query = SermonQuery::from_params(&params).with_drafts();
    let page = state.repos.sermons.list(&query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/sermons/{id}
pub async fn get_sermon(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(sermon_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sermon = state
        .repos
        .sermons
        .find_by_id(sermon_id)
        .await?
        .ok_or_else(|| sermon_not_found(sermon_id))?;
    Ok(Json(DataResponse { data: sermon }))
}

/// POST /api/v1/admin/sermons
///
/// A blank slug is derived from the title.
pub async fn create_sermon(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(mut input): Json<CreateSermon>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    input.slug = match input.slug.trim() {
        "" => slugify(&input.title),
        given => given.to_string(),
    };
    validate_slug(&input.slug)?;
    input.tags = normalize_tags(&input.tags);
    if let Some(status) = &input.status {
        validate_sermon_status(status)?;
    }

    let sermon = state.repos.sermons.create(&input).await?;

    tracing::info!(
        sermon_id = sermon.id,
        slug = %sermon.slug,
        status = %sermon.status,
        user_id = %editor.user_id,
        "Sermon created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: sermon })))
}

/// PUT /api/v1/admin/sermons/{id}
///
/// Partial update; absent fields are left unchanged.
pub async fn update_sermon(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(sermon_id): Path<DbId>,
    Json(mut input): Json<UpdateSermon>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    if let Some(status) = &input.status {
        validate_sermon_status(status)?;
    }
    if let Some(tags) = input.tags.take() {
        input.tags = Some(normalize_tags(&tags));
    }

    let sermon = state
        .repos
        .sermons
        .update(sermon_id, &input)
        .await?
        .ok_or_else(|| sermon_not_found(sermon_id))?;

    tracing::info!(
        sermon_id,
        user_id = %editor.user_id,
        "Sermon updated",
    );

    Ok(Json(DataResponse { data: sermon }))
}

/// DELETE /api/v1/admin/sermons/{id}
pub async fn delete_sermon(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(sermon_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.repos.sermons.delete(sermon_id).await? {
        return Err(sermon_not_found(sermon_id));
    }

    tracing::info!(sermon_id, user_id = %editor.user_id, "Sermon deleted");

    Ok(StatusCode::NO_CONTENT)
}
