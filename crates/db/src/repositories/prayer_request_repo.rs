//! PostgreSQL repository for the `prayer_requests` table.

use async_trait::async_trait;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::types::DbId;

use super::PrayerRequestRepository;
use crate::models::prayer_request::{
    CreatePrayerRequest, PrayerRequest, PrayerStats, PublicPrayerRequest,
};
use crate::{DbPool, RepoResult};

const COLUMNS: &str = "\
    id, user_id, name, email, request_text, is_private, is_approved, is_answered, created_at";

const PUBLIC_COLUMNS: &str = "id, name, request_text, is_answered, created_at";

const PUBLIC_FILTER: &str = "WHERE is_private = FALSE AND is_approved = TRUE";

/// Prayer request repository over a PostgreSQL pool.
pub struct PgPrayerRequestRepository {
    pool: DbPool,
}

impl PgPrayerRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrayerRequestRepository for PgPrayerRequestRepository {
    async fn submit(
        &self,
        user_id: Option<&str>,
        input: &CreatePrayerRequest,
    ) -> RepoResult<PrayerRequest> {
        let query = format!(
            "INSERT INTO prayer_requests (user_id, name, email, request_text, is_private)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrayerRequest>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.request_text.trim())
            .bind(input.is_private)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_public(&self, pagination: Pagination) -> RepoResult<Page<PublicPrayerRequest>> {
        let count_sql = format!("SELECT COUNT(*) FROM prayer_requests {PUBLIC_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM prayer_requests {PUBLIC_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, PublicPrayerRequest>(&query)
            .bind(pagination.per_page)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, total, pagination))
    }

    async fn list_all(&self, pagination: Pagination) -> RepoResult<Page<PrayerRequest>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prayer_requests")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM prayer_requests
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, PrayerRequest>(&query)
            .bind(pagination.per_page)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, total, pagination))
    }

    async fn approve(&self, id: DbId) -> RepoResult<Option<PrayerRequest>> {
        let query = format!(
            "UPDATE prayer_requests SET is_approved = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrayerRequest>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn mark_answered(&self, id: DbId) -> RepoResult<Option<PrayerRequest>> {
        let query = format!(
            "UPDATE prayer_requests SET is_answered = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrayerRequest>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn stats(&self) -> RepoResult<PrayerStats> {
        let stats = sqlx::query_as::<_, PrayerStats>(
            "SELECT COUNT(*) AS prayer_requests,
                    COUNT(*) FILTER (WHERE is_approved = FALSE) AS pending_requests
             FROM prayer_requests",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}
