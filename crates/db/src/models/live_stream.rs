//! Live-stream settings model (single-row table).

use chapel_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The `live_stream_settings` row. There is exactly one, with `id = 1`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct LiveStreamSettings {
    /// Streaming-provider stream identifier.
    pub stream_id: String,
    pub title: String,
    pub description: String,
    pub auto_start_recording: bool,
    pub enable_low_latency: bool,
    pub enable_dvr: bool,
    pub max_bitrate_kbps: i32,
    pub resolution: String,
    pub chat_moderation: bool,
    pub require_approval: bool,
    pub auto_publish: bool,
    pub default_visibility: String,
    pub updated_at: Timestamp,
}

impl LiveStreamSettings {
    /// Values seeded by the initial migration.
    pub fn seed(now: Timestamp) -> Self {
        Self {
            stream_id: "DS00Spx1CV902MCtPj5WknGlR102V5HFkDe".to_string(),
            title: "Sunday Worship Service".to_string(),
            description: "Join us for worship, prayer, and teaching from God's Word.".to_string(),
            auto_start_recording: true,
            enable_low_latency: true,
            enable_dvr: true,
            max_bitrate_kbps: 6000,
            resolution: "1080p".to_string(),
            chat_moderation: true,
            require_approval: false,
            auto_publish: true,
            default_visibility: "public".to_string(),
            updated_at: now,
        }
    }

    /// Apply the non-`None` fields of `input`.
    pub fn apply(&mut self, input: &UpdateLiveStreamSettings, now: Timestamp) {
        if let Some(v) = &input.stream_id {
            self.stream_id = v.clone();
        }
        if let Some(v) = &input.title {
            self.title = v.clone();
        }
        if let Some(v) = &input.description {
            self.description = v.clone();
        }
        if let Some(v) = input.auto_start_recording {
            self.auto_start_recording = v;
        }
        if let Some(v) = input.enable_low_latency {
            self.enable_low_latency = v;
        }
        if let Some(v) = input.enable_dvr {
            self.enable_dvr = v;
        }
        if let Some(v) = input.max_bitrate_kbps {
            self.max_bitrate_kbps = v;
        }
        if let Some(v) = &input.resolution {
            self.resolution = v.clone();
        }
        if let Some(v) = input.chat_moderation {
            self.chat_moderation = v;
        }
        if let Some(v) = input.require_approval {
            self.require_approval = v;
        }
        if let Some(v) = input.auto_publish {
            self.auto_publish = v;
        }
        if let Some(v) = &input.default_visibility {
            self.default_visibility = v.clone();
        }
        self.updated_at = now;
    }
}

/// DTO for updating live-stream settings. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLiveStreamSettings {
    pub stream_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub auto_start_recording: Option<bool>,
    pub enable_low_latency: Option<bool>,
    pub enable_dvr: Option<bool>,
    pub max_bitrate_kbps: Option<i32>,
    pub resolution: Option<String>,
    pub chat_moderation: Option<bool>,
    pub require_approval: Option<bool>,
    pub auto_publish: Option<bool>,
    pub default_visibility: Option<String>,
}
