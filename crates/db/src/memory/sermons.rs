use std::collections::BTreeSet;

use async_trait::async_trait;
use chapel_core::content::STATUS_PUBLISHED;
use chapel_core::error::CoreError;
use chapel_core::pagination::Page;
use chapel_core::sermon_query::{SermonQuery, SermonRecord};
use chapel_core::types::{DbId, Timestamp};
use chrono::Utc;
use tokio::sync::RwLock;

use super::Table;
use crate::models::sermon::{CreateSermon, FilterOption, Sermon, SermonStats, UpdateSermon};
use crate::repositories::SermonRepository;
use crate::RepoResult;

#[derive(Default)]
pub struct MemorySermonRepository {
    table: RwLock<Table<Sermon>>,
}

impl MemorySermonRepository {
    pub fn seeded(rows: Vec<Sermon>) -> Self {
        Self {
            table: RwLock::new(Table::seeded(rows)),
        }
    }
}

fn slug_taken(slug: &str) -> CoreError {
    CoreError::Conflict(format!("A sermon with slug '{slug}' already exists"))
}

/// Published sermons newest first.
fn newest_published(rows: &[Sermon]) -> Vec<&Sermon> {
    let mut out: Vec<&Sermon> = rows.iter().filter(|s| s.is_published()).collect();
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    out
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FilterOption> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(FilterOption::same)
        .collect()
}

#[async_trait]
impl SermonRepository for MemorySermonRepository {
    async fn list(&self, query: &SermonQuery) -> RepoResult<Page<Sermon>> {
        let table = self.table.read().await;
        let mut matched: Vec<&Sermon> = table.rows.iter().filter(|s| query.matches(*s)).collect();
        matched.sort_by(|a, b| query.compare(*a, *b));

        let total = matched.len() as i64;
        let items = query
            .pagination
            .slice(&matched)
            .into_iter()
            .cloned()
            .collect();
        Ok(Page::new(items, total, query.pagination))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Sermon>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|s| s.id == id).cloned())
    }

    async fn view_by_slug(&self, slug: &str) -> RepoResult<Option<Sermon>> {
        let mut table = self.table.write().await;
        let sermon = table
            .rows
            .iter_mut()
            .find(|s| s.slug == slug && s.is_published());
        Ok(sermon.map(|s| {
            s.view_count += 1;
            s.clone()
        }))
    }

    async fn related(
        &self,
        id: DbId,
        series: Option<&str>,
        limit: i64,
    ) -> RepoResult<Vec<Sermon>> {
        let table = self.table.read().await;
        Ok(newest_published(&table.rows)
            .into_iter()
            .filter(|s| s.id != id)
            .filter(|s| series.is_none() || s.series.as_deref() == series)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn latest(&self, limit: i64) -> RepoResult<Vec<Sermon>> {
        let table = self.table.read().await;
        Ok(newest_published(&table.rows)
            .into_iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn speakers(&self) -> RepoResult<Vec<FilterOption>> {
        let table = self.table.read().await;
        Ok(distinct(
            table
                .rows
                .iter()
                .filter(|s| s.is_published())
                .map(|s| s.speaker.as_str()),
        ))
    }

    async fn series(&self) -> RepoResult<Vec<FilterOption>> {
        let table = self.table.read().await;
        Ok(distinct(
            table
                .rows
                .iter()
                .filter(|s| s.is_published())
                .filter_map(|s| s.series.as_deref()),
        ))
    }

    async fn topics(&self) -> RepoResult<Vec<FilterOption>> {
        let table = self.table.read().await;
        Ok(distinct(
            table
                .rows
                .iter()
                .filter(|s| s.is_published())
                .flat_map(|s| s.tags.iter().map(String::as_str)),
        ))
    }

    async fn create(&self, input: &CreateSermon) -> RepoResult<Sermon> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|s| s.slug == input.slug) {
            return Err(slug_taken(&input.slug).into());
        }

        let now = Utc::now();
        let sermon = Sermon {
            id: table.next_id(),
            title: input.title.clone(),
            slug: input.slug.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
            scripture_reference: input.scripture_reference.clone(),
            speaker: input.speaker.clone(),
            date: input.date,
            video_url: input.video_url.clone(),
            audio_url: input.audio_url.clone(),
            image_url: input.image_url.clone(),
            series: input.series.clone(),
            tags: input.tags.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| STATUS_PUBLISHED.to_string()),
            view_count: 0,
            download_count: 0,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(sermon.clone());
        Ok(sermon)
    }

    async fn update(&self, id: DbId, input: &UpdateSermon) -> RepoResult<Option<Sermon>> {
        let mut table = self.table.write().await;
        if let Some(slug) = &input.slug {
            if table.rows.iter().any(|s| s.id != id && &s.slug == slug) {
                return Err(slug_taken(slug).into());
            }
        }

        let Some(sermon) = table.rows.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.title {
            sermon.title = v.clone();
        }
        if let Some(v) = &input.slug {
            sermon.slug = v.clone();
        }
        if let Some(v) = &input.description {
            sermon.description = v.clone();
        }
        if let Some(v) = &input.content {
            sermon.content = v.clone();
        }
        if let Some(v) = &input.scripture_reference {
            sermon.scripture_reference = v.clone();
        }
        if let Some(v) = &input.speaker {
            sermon.speaker = v.clone();
        }
        if let Some(v) = input.date {
            sermon.date = v;
        }
        if let Some(v) = &input.video_url {
            sermon.video_url = Some(v.clone());
        }
        if let Some(v) = &input.audio_url {
            sermon.audio_url = Some(v.clone());
        }
        if let Some(v) = &input.image_url {
            sermon.image_url = Some(v.clone());
        }
        if let Some(v) = &input.series {
            sermon.series = Some(v.clone());
        }
        if let Some(v) = &input.tags {
            sermon.tags = v.clone();
        }
        if let Some(v) = &input.status {
            sermon.status = v.clone();
        }
        sermon.updated_at = Utc::now();
        Ok(Some(sermon.clone()))
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|s| s.id != id);
        Ok(table.rows.len() < before)
    }

    async fn increment_downloads(&self, id: DbId) -> RepoResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|s| s.id == id) {
            Some(sermon) => {
                sermon.download_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stats(&self, since: Timestamp) -> RepoResult<SermonStats> {
        let table = self.table.read().await;
        Ok(SermonStats {
            recent_sermons: table.rows.iter().filter(|s| s.date >= since).count() as i64,
            total_views: table.rows.iter().map(|s| s.view_count).sum(),
        })
    }
}
