//! Sermon entity model and DTOs.

use chapel_core::sermon_query::SermonRecord;
use chapel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A sermon row from the `sermons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sermon {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub scripture_reference: String,
    pub speaker: String,
    pub date: Timestamp,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
    pub series: Option<String>,
    pub tags: Vec<String>,
    /// `published` or `draft`.
    pub status: String,
    pub view_count: i64,
    pub download_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SermonRecord for Sermon {
    fn id(&self) -> DbId {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn speaker(&self) -> &str {
        &self.speaker
    }
    fn series(&self) -> Option<&str> {
        self.series.as_deref()
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn date(&self) -> Timestamp {
        self.date
    }
    fn view_count(&self) -> i64 {
        self.view_count
    }
    fn is_published(&self) -> bool {
        self.status == chapel_core::content::STATUS_PUBLISHED
    }
}

/// DTO for creating a sermon.
///
/// An empty `slug` is derived from the title; `tags` are normalized and
/// `status` defaults to `published` before the row is written.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSermon {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub scripture_reference: String,
    #[validate(length(min = 1, message = "Speaker is required"))]
    pub speaker: String,
    pub date: Timestamp,
    #[validate(url(message = "Video URL must be a valid URL"))]
    pub video_url: Option<String>,
    #[validate(url(message = "Audio URL must be a valid URL"))]
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
    pub series: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<String>,
}

/// DTO for updating a sermon. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSermon {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub content: Option<String>,
    pub scripture_reference: Option<String>,
    #[validate(length(min = 1, message = "Speaker must not be empty"))]
    pub speaker: Option<String>,
    pub date: Option<Timestamp>,
    #[validate(url(message = "Video URL must be a valid URL"))]
    pub video_url: Option<String>,
    #[validate(url(message = "Audio URL must be a valid URL"))]
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
    pub series: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// One entry of a filter dropdown (speakers, series, topics).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct FilterOption {
    pub id: String,
    pub name: String,
}

impl FilterOption {
    pub fn same(value: &str) -> Self {
        Self {
            id: value.to_string(),
            name: value.to_string(),
        }
    }
}

/// Sermon figures for the admin dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct SermonStats {
    /// Sermons dated within the reporting window.
    pub recent_sermons: i64,
    /// Sum of `view_count` across all sermons.
    pub total_views: i64,
}
