use std::sync::Arc;

use chapel_db::Repositories;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: repositories are `Arc<dyn _>` and the config is shared.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend chosen at startup (PostgreSQL or in-memory).
    pub repos: Repositories,
    pub config: Arc<ServerConfig>,
}
