use async_trait::async_trait;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Table;
use crate::models::prayer_request::{
    CreatePrayerRequest, PrayerRequest, PrayerStats, PublicPrayerRequest,
};
use crate::repositories::PrayerRequestRepository;
use crate::RepoResult;

#[derive(Default)]
pub struct MemoryPrayerRequestRepository {
    table: RwLock<Table<PrayerRequest>>,
}

impl MemoryPrayerRequestRepository {
    async fn modify(
        &self,
        id: DbId,
        apply: impl FnOnce(&mut PrayerRequest) + Send,
    ) -> Option<PrayerRequest> {
        let mut table = self.table.write().await;
        table.rows.iter_mut().find(|r| r.id == id).map(|row| {
            apply(row);
            row.clone()
        })
    }
}

fn newest_first(rows: &mut [&PrayerRequest]) {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

#[async_trait]
impl PrayerRequestRepository for MemoryPrayerRequestRepository {
    async fn submit(
        &self,
        user_id: Option<&str>,
        input: &CreatePrayerRequest,
    ) -> RepoResult<PrayerRequest> {
        let mut table = self.table.write().await;
        let row = PrayerRequest {
            id: table.next_id(),
            user_id: user_id.map(ToString::to_string),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            request_text: input.request_text.trim().to_string(),
            is_private: input.is_private,
            is_approved: false,
            is_answered: false,
            created_at: Utc::now(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list_public(&self, pagination: Pagination) -> RepoResult<Page<PublicPrayerRequest>> {
        let table = self.table.read().await;
        let mut rows: Vec<&PrayerRequest> = table
            .rows
            .iter()
            .filter(|r| r.is_approved && !r.is_private)
            .collect();
        newest_first(&mut rows);

        let total = rows.len() as i64;
        let items = pagination
            .slice(&rows)
            .into_iter()
            .map(PublicPrayerRequest::from)
            .collect();
        Ok(Page::new(items, total, pagination))
    }

    async fn list_all(&self, pagination: Pagination) -> RepoResult<Page<PrayerRequest>> {
        let table = self.table.read().await;
        let mut rows: Vec<&PrayerRequest> = table.rows.iter().collect();
        newest_first(&mut rows);

        let total = rows.len() as i64;
        let items = pagination.slice(&rows).into_iter().cloned().collect();
        Ok(Page::new(items, total, pagination))
    }

    async fn approve(&self, id: DbId) -> RepoResult<Option<PrayerRequest>> {
        Ok(self.modify(id, |r| r.is_approved = true).await)
    }

    async fn mark_answered(&self, id: DbId) -> RepoResult<Option<PrayerRequest>> {
        Ok(self.modify(id, |r| r.is_answered = true).await)
    }

    async fn stats(&self) -> RepoResult<PrayerStats> {
        let table = self.table.read().await;
        Ok(PrayerStats {
            prayer_requests: table.rows.len() as i64,
            pending_requests: table.rows.iter().filter(|r| !r.is_approved).count() as i64,
        })
    }
}
