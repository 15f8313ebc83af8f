//! In-memory implementations of the repository traits.
//!
//! Used by the API test suite and by `DATA_BACKEND=memory` for local demos.
//! Each repository guards its rows with a `tokio::sync::RwLock`; operations
//! that check and then write (slug uniqueness, registration admission) hold
//! the write lock across both steps.

use std::sync::Arc;

use async_trait::async_trait;
use chapel_core::types::DbId;
use chrono::Utc;

use crate::models::event::Event;
use crate::models::sermon::Sermon;
use crate::repositories::HealthProbe;
use crate::{RepoResult, Repositories};

mod events;
mod live_stream;
mod members;
mod prayer_requests;
mod samples;
mod sermons;

pub use events::MemoryEventRepository;
pub use live_stream::MemoryLiveStreamRepository;
pub use members::MemoryMemberRepository;
pub use prayer_requests::MemoryPrayerRequestRepository;
pub use sermons::MemorySermonRepository;

/// Rows plus the next id to hand out, mimicking a `BIGSERIAL` column.
#[derive(Debug)]
pub(crate) struct Table<T> {
    pub(crate) rows: Vec<T>,
    next_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Rows whose ids are `1..=rows.len()`.
    pub(crate) fn seeded(rows: Vec<T>) -> Self {
        let next_id = rows.len() as DbId + 1;
        Self { rows, next_id }
    }

    pub(crate) fn next_id(&mut self) -> DbId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Initial contents for a fresh set of in-memory repositories.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sermons: Vec<Sermon>,
    events: Vec<Event>,
}

impl MemoryStore {
    /// A store preloaded with a few published sermons and upcoming events.
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let store = Self {
            sermons: samples::sermons(),
            events: samples::events(now),
        };
        tracing::info!(
            sermons = store.sermons.len(),
            events = store.events.len(),
            "Seeded in-memory store with sample content",
        );
        store
    }

    pub fn into_repositories(self) -> Repositories {
        Repositories {
            sermons: Arc::new(MemorySermonRepository::seeded(self.sermons)),
            events: Arc::new(MemoryEventRepository::seeded(self.events)),
            members: Arc::new(MemoryMemberRepository::default()),
            prayer_requests: Arc::new(MemoryPrayerRequestRepository::default()),
            live_stream: Arc::new(MemoryLiveStreamRepository::default()),
            health: Arc::new(MemoryHealthProbe),
        }
    }
}

/// The in-memory backend is always reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryHealthProbe;

#[async_trait]
impl HealthProbe for MemoryHealthProbe {
    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
