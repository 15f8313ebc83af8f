//! PostgreSQL repository for the singleton `live_stream_settings` row.

use async_trait::async_trait;

use super::LiveStreamRepository;
use crate::models::live_stream::{LiveStreamSettings, UpdateLiveStreamSettings};
use crate::{DbPool, RepoResult};

const COLUMNS: &str = "\
    stream_id, title, description, auto_start_recording, enable_low_latency, enable_dvr, \
    max_bitrate_kbps, resolution, chat_moderation, require_approval, auto_publish, \
    default_visibility, updated_at";

/// Live-stream settings repository over a PostgreSQL pool.
pub struct PgLiveStreamRepository {
    pool: DbPool,
}

impl PgLiveStreamRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LiveStreamRepository for PgLiveStreamRepository {
    async fn settings(&self) -> RepoResult<LiveStreamSettings> {
        let query = format!("SELECT {COLUMNS} FROM live_stream_settings WHERE id = 1");
        let row = sqlx::query_as::<_, LiveStreamSettings>(&query)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_settings(
        &self,
        input: &UpdateLiveStreamSettings,
    ) -> RepoResult<LiveStreamSettings> {
        let query = format!(
            "UPDATE live_stream_settings SET
                stream_id = COALESCE($1, stream_id),
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                auto_start_recording = COALESCE($4, auto_start_recording),
                enable_low_latency = COALESCE($5, enable_low_latency),
                enable_dvr = COALESCE($6, enable_dvr),
                max_bitrate_kbps = COALESCE($7, max_bitrate_kbps),
                resolution = COALESCE($8, resolution),
                chat_moderation = COALESCE($9, chat_moderation),
                require_approval = COALESCE($10, require_approval),
                auto_publish = COALESCE($11, auto_publish),
                default_visibility = COALESCE($12, default_visibility),
                updated_at = NOW()
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, LiveStreamSettings>(&query)
            .bind(&input.stream_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.auto_start_recording)
            .bind(input.enable_low_latency)
            .bind(input.enable_dvr)
            .bind(input.max_bitrate_kbps)
            .bind(&input.resolution)
            .bind(input.chat_moderation)
            .bind(input.require_approval)
            .bind(input.auto_publish)
            .bind(&input.default_visibility)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
