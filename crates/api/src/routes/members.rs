//! Route definitions for members.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Member self-service routes mounted at `/members`.
///
/// ```text
/// POST /     -> register_member
/// GET  /me   -> current_member
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(members::register_member))
        .route("/me", get(members::current_member))
}

/// Member directory mounted at `/admin/members`.
///
/// ```text
/// GET /   -> list_members
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(members::list_members))
}
