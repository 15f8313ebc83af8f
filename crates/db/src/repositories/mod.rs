//! Repository layer.
//!
//! Each capability is a trait so handlers can run against PostgreSQL in
//! production and against the in-memory store in tests and demos. The `Pg*`
//! structs hold a cloned `PgPool` and implement the traits with plain SQL.

use async_trait::async_trait;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::sermon_query::SermonQuery;
use chapel_core::types::{DbId, Timestamp};

use crate::models::event::{
    CreateEvent, CreateEventRegistration, Event, EventRegistration, EventStats,
};
use crate::models::live_stream::{LiveStreamSettings, UpdateLiveStreamSettings};
use crate::models::member::{CreateMember, Member, MemberStats};
use crate::models::prayer_request::{
    CreatePrayerRequest, PrayerRequest, PrayerStats, PublicPrayerRequest,
};
use crate::models::sermon::{CreateSermon, FilterOption, Sermon, SermonStats, UpdateSermon};
use crate::RepoResult;

pub mod event_repo;
pub mod health;
pub mod live_stream_repo;
pub mod member_repo;
pub mod prayer_request_repo;
pub mod sermon_repo;

pub use event_repo::PgEventRepository;
pub use health::PgHealthProbe;
pub use live_stream_repo::PgLiveStreamRepository;
pub use member_repo::PgMemberRepository;
pub use prayer_request_repo::PgPrayerRequestRepository;
pub use sermon_repo::PgSermonRepository;

/// Sermon storage and listing.
#[async_trait]
pub trait SermonRepository: Send + Sync {
    /// Filtered, sorted page of sermons plus the total match count.
    async fn list(&self, query: &SermonQuery) -> RepoResult<Page<Sermon>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Sermon>>;

    /// Fetch a published sermon by slug and count the view.
    async fn view_by_slug(&self, slug: &str) -> RepoResult<Option<Sermon>>;

    /// Published sermons other than `id`, restricted to `series` when given,
    /// newest first.
    async fn related(
        &self,
        id: DbId,
        series: Option<&str>,
        limit: i64,
    ) -> RepoResult<Vec<Sermon>>;

    /// Newest published sermons.
    async fn latest(&self, limit: i64) -> RepoResult<Vec<Sermon>>;

    async fn speakers(&self) -> RepoResult<Vec<FilterOption>>;

    async fn series(&self) -> RepoResult<Vec<FilterOption>>;

    async fn topics(&self) -> RepoResult<Vec<FilterOption>>;

    /// Insert a sermon. `input.slug` must already be resolved.
    async fn create(&self, input: &CreateSermon) -> RepoResult<Sermon>;

    /// Returns `None` if no sermon has this id.
    async fn update(&self, id: DbId, input: &UpdateSermon) -> RepoResult<Option<Sermon>>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> RepoResult<bool>;

    /// Returns `true` if the sermon exists.
    async fn increment_downloads(&self, id: DbId) -> RepoResult<bool>;

    /// Dashboard figures; "recent" means dated at or after `since`.
    async fn stats(&self, since: Timestamp) -> RepoResult<SermonStats>;
}

/// Events and their registrations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert an event. `input.slug` must already be resolved.
    async fn create(&self, input: &CreateEvent) -> RepoResult<Event>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Event>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Event>>;

    /// Events starting at or after `now`, soonest first.
    async fn upcoming(&self, now: Timestamp, limit: i64) -> RepoResult<Vec<Event>>;

    /// All events, latest start first, optionally restricted to `category`.
    async fn list(&self, pagination: Pagination, category: Option<&str>)
        -> RepoResult<Page<Event>>;

    /// Distinct non-empty categories, alphabetical.
    async fn categories(&self) -> RepoResult<Vec<String>>;

    /// Admit and store a registration. Admission checks and the insert are
    /// atomic with respect to other registrations for the same event.
    async fn register(
        &self,
        event_id: DbId,
        user_id: Option<&str>,
        input: &CreateEventRegistration,
    ) -> RepoResult<EventRegistration>;

    /// Whether `email` (case-insensitive) holds a registration for the event.
    async fn is_registered(&self, event_id: DbId, email: &str) -> RepoResult<bool>;

    /// Registrations for an event, newest first.
    async fn registrations(&self, event_id: DbId) -> RepoResult<Vec<EventRegistration>>;

    async fn stats(&self, now: Timestamp) -> RepoResult<EventStats>;
}

/// Church members keyed by identity-provider user id.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member for `user_id`. Rejects with a conflict if the user id
    /// or email is already on file.
    async fn register(&self, user_id: &str, input: &CreateMember) -> RepoResult<Member>;

    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Member>>;

    /// Newest members first.
    async fn list(&self, pagination: Pagination) -> RepoResult<Page<Member>>;

    /// Dashboard figures; "new" means created at or after `since`.
    async fn stats(&self, since: Timestamp) -> RepoResult<MemberStats>;
}

/// Prayer request submission and moderation.
#[async_trait]
pub trait PrayerRequestRepository: Send + Sync {
    async fn submit(
        &self,
        user_id: Option<&str>,
        input: &CreatePrayerRequest,
    ) -> RepoResult<PrayerRequest>;

    /// Approved, non-private requests only, newest first.
    async fn list_public(&self, pagination: Pagination) -> RepoResult<Page<PublicPrayerRequest>>;

    /// Every request, newest first.
    async fn list_all(&self, pagination: Pagination) -> RepoResult<Page<PrayerRequest>>;

    /// Returns `None` if no request has this id.
    async fn approve(&self, id: DbId) -> RepoResult<Option<PrayerRequest>>;

    /// Returns `None` if no request has this id.
    async fn mark_answered(&self, id: DbId) -> RepoResult<Option<PrayerRequest>>;

    async fn stats(&self) -> RepoResult<PrayerStats>;
}

/// The single live-stream settings record.
#[async_trait]
pub trait LiveStreamRepository: Send + Sync {
    async fn settings(&self) -> RepoResult<LiveStreamSettings>;

    async fn update_settings(
        &self,
        input: &UpdateLiveStreamSettings,
    ) -> RepoResult<LiveStreamSettings>;
}

/// Backend reachability for `/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn health_check(&self) -> RepoResult<()>;

    /// Short backend name reported by `/health`.
    fn backend(&self) -> &'static str;
}
