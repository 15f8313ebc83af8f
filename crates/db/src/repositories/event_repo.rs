//! PostgreSQL repository for `events` and `event_registrations`.

use async_trait::async_trait;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::registration::{check_registration, normalize_email, EventCapacity};
use chapel_core::types::{DbId, Timestamp};

use super::EventRepository;
use crate::models::event::{
    CreateEvent, CreateEventRegistration, Event, EventRegistration, EventStats,
};
use crate::{DbPool, RepoResult};

/// Column list shared across event queries.
const COLUMNS: &str = "\
    id, title, slug, description, content, start_date, end_date, time_label, location, \
    image_url, category, is_recurring, registration_required, max_attendees, \
    created_at, updated_at";

const REGISTRATION_COLUMNS: &str = "\
    id, event_id, user_id, first_name, last_name, email, phone, num_guests, comments, created_at";

/// Event repository over a PostgreSQL pool.
pub struct PgEventRepository {
    pool: DbPool,
}

impl PgEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: &CreateEvent) -> RepoResult<Event> {
        let query = format!(
            "INSERT INTO events (
                title, slug, description, content, start_date, end_date, time_label,
                location, image_url, category, is_recurring, registration_required, max_attendees
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.time_label)
            .bind(&input.location)
            .bind(&input.image_url)
            .bind(&input.category)
            .bind(input.is_recurring)
            .bind(input.registration_required)
            .bind(input.max_attendees)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Event>> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Event>> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE slug = $1");
        let row = sqlx::query_as::<_, Event>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn upcoming(&self, now: Timestamp, limit: i64) -> RepoResult<Vec<Event>> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE start_date >= $1
             ORDER BY start_date ASC, id ASC
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, Event>(&query)
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list(
        &self,
        pagination: Pagination,
        category: Option<&str>,
    ) -> RepoResult<Page<Event>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE ($1::TEXT IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::TEXT IS NULL OR category = $1)
             ORDER BY start_date DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Event>(&query)
            .bind(category)
            .bind(pagination.per_page)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, total, pagination))
    }

    async fn categories(&self) -> RepoResult<Vec<String>> {
        let rows = sqlx::query_scalar(
            "SELECT DISTINCT category FROM events
             WHERE category IS NOT NULL AND category <> ''
             ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Locks the event row for the duration of the transaction so concurrent
    /// registrations for the same event serialize on the capacity check.
    async fn register(
        &self,
        event_id: DbId,
        user_id: Option<&str>,
        input: &CreateEventRegistration,
    ) -> RepoResult<EventRegistration> {
        let mut tx = self.pool.begin().await?;

        let capacity: Option<(DbId, bool, Option<i32>)> = sqlx::query_as(
            "SELECT id, registration_required, max_attendees FROM events
             WHERE id = $1
             FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;
        let capacity = capacity.map(|(id, registration_required, max_attendees)| EventCapacity {
            event_id: id,
            registration_required,
            max_attendees,
        });

        let email = normalize_email(&input.email);
        let already_registered: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM event_registrations WHERE event_id = $1 AND lower(email) = $2
             )",
        )
        .bind(event_id)
        .bind(&email)
        .fetch_one(&mut *tx)
        .await?;

        let current_attendees: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(num_guests + 1), 0)::BIGINT
             FROM event_registrations WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        check_registration(
            event_id,
            capacity,
            already_registered,
            current_attendees,
            input.num_guests,
        )?;

        let query = format!(
            "INSERT INTO event_registrations (
                event_id, user_id, first_name, last_name, email, phone, num_guests, comments
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {REGISTRATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRegistration>(&query)
            .bind(event_id)
            .bind(user_id)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(&email)
            .bind(&input.phone)
            .bind(input.num_guests)
            .bind(&input.comments)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn is_registered(&self, event_id: DbId, email: &str) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM event_registrations WHERE event_id = $1 AND lower(email) = $2
             )",
        )
        .bind(event_id)
        .bind(normalize_email(email))
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn registrations(&self, event_id: DbId) -> RepoResult<Vec<EventRegistration>> {
        let query = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations
             WHERE event_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, EventRegistration>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn stats(&self, now: Timestamp) -> RepoResult<EventStats> {
        let upcoming_events: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE start_date >= $1")
                .bind(now)
                .fetch_one(&self.pool)
                .await?;

        let next_event_name: Option<String> = sqlx::query_scalar(
            "SELECT title FROM events
             WHERE start_date >= $1
             ORDER BY start_date ASC, id ASC
             LIMIT 1",
        )
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(EventStats {
            upcoming_events,
            next_event_name,
        })
    }
}
