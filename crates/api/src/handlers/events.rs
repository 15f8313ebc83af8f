//! Handlers for events and event registration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chapel_core::content::{slugify, validate_slug};
use chapel_core::error::CoreError;
use chapel_core::types::DbId;
use chapel_db::models::event::{CreateEvent, CreateEventRegistration, Event, RegistrationStatus};
use chapel_db::models::validate_input;
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{EmailParams, EventListParams, LimitParams};
use crate::response::DataResponse;
use crate::state::AppState;

const UPCOMING_DEFAULT: i64 = 3;
const UPCOMING_MAX: i64 = 20;

async fn find_event(state: &AppState, event_id: DbId) -> AppResult<Event> {
    state
        .repos
        .events
        .find_by_id(event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))
}

// ---------------------------------------------------------------------------
// Public listing
// ---------------------------------------------------------------------------

/// GET /api/v1/events
///
/// All events, latest start first, optionally filtered by `category`.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .repos
        .events
        .list(params.pagination(), params.category())
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit(UPCOMING_DEFAULT, UPCOMING_MAX);
    let events = state.repos.events.upcoming(Utc::now(), limit).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.repos.events.categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/events/slug/{slug}
pub async fn get_event_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event = state
        .repos
        .events
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Event",
                key: slug.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: event }))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// POST /api/v1/events/{id}/registrations
///
/// Register an attendee. Signed-in callers have their user id recorded.
/// Rejects unknown events (404), events without registration (400),
/// duplicate emails and requests beyond capacity (409).
pub async fn register_for_event(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateEventRegistration>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let registration = state
        .repos
        .events
        .register(event_id, caller.user_id(), &input)
        .await?;

    tracing::info!(
        event_id,
        registration_id = registration.id,
        num_guests = registration.num_guests,
        signed_in = caller.0.is_some(),
        "Event registration created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

/// GET /api/v1/events/{id}/registration-status?email=
pub async fn registration_status(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let email = params.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::BadRequest("email must not be empty".into()));
    }
    find_event(&state, event_id).await?;

    let is_registered = state.repos.events.is_registered(event_id, email).await?;
    Ok(Json(DataResponse {
        data: RegistrationStatus { is_registered },
    }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/events
///
/// A blank slug is derived from the title.
pub async fn create_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    input.slug = match input.slug.trim() {
        "" => slugify(&input.title),
        given => given.to_string(),
    };
    validate_slug(&input.slug)?;
    if let Some(end) = input.end_date {
        if end < input.start_date {
            return Err(AppError::Core(CoreError::Validation(
                "End date must not be before start date".into(),
            )));
        }
    }

    let event = state.repos.events.create(&input).await?;

    tracing::info!(
        event_id = event.id,
        slug = %event.slug,
        registration_required = event.registration_required,
        user_id = %admin.user_id,
        "Event created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/admin/events/{id}/registrations
pub async fn list_event_registrations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_event(&state, event_id).await?;
    let registrations = state.repos.events.registrations(event_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}
