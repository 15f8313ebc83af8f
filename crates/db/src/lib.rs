//! Data access for the Chapel backend.
//!
//! - [`models`] -- row structs and input DTOs.
//! - [`repositories`] -- repository traits plus their PostgreSQL implementations.
//! - [`memory`] -- in-memory implementations of the same traits.
//!
//! Handlers only ever see the traits, bundled in [`Repositories`], so the
//! storage backend is chosen once at startup.

use std::sync::Arc;

use chapel_core::error::CoreError;
use chapel_core::registration::RegistrationRejection;
use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;

use repositories::{
    EventRepository, HealthProbe, LiveStreamRepository, MemberRepository, PgEventRepository,
    PgHealthProbe, PgLiveStreamRepository, PgMemberRepository, PgPrayerRequestRepository,
    PgSermonRepository, PrayerRequestRepository, SermonRepository,
};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Error type returned by every repository method.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The database rejected or failed the query.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A domain rule refused the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<RegistrationRejection> for RepoError {
    fn from(rejection: RegistrationRejection) -> Self {
        RepoError::Core(rejection.into())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// All repositories the API needs, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub sermons: Arc<dyn SermonRepository>,
    pub events: Arc<dyn EventRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub prayer_requests: Arc<dyn PrayerRequestRepository>,
    pub live_stream: Arc<dyn LiveStreamRepository>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            sermons: Arc::new(PgSermonRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool.clone())),
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            prayer_requests: Arc::new(PgPrayerRequestRepository::new(pool.clone())),
            live_stream: Arc::new(PgLiveStreamRepository::new(pool.clone())),
            health: Arc::new(PgHealthProbe::new(pool)),
        }
    }

    /// Empty in-memory repositories (default live-stream settings only).
    pub fn in_memory() -> Self {
        memory::MemoryStore::default().into_repositories()
    }

    /// In-memory repositories preloaded with sample sermons and events.
    pub fn in_memory_with_samples() -> Self {
        memory::MemoryStore::with_samples().into_repositories()
    }
}
