use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::live_stream::{LiveStreamSettings, UpdateLiveStreamSettings};
use crate::repositories::LiveStreamRepository;
use crate::RepoResult;

pub struct MemoryLiveStreamRepository {
    settings: RwLock<LiveStreamSettings>,
}

impl Default for MemoryLiveStreamRepository {
    fn default() -> Self {
        Self {
            settings: RwLock::new(LiveStreamSettings::seed(Utc::now())),
        }
    }
}

#[async_trait]
impl LiveStreamRepository for MemoryLiveStreamRepository {
    async fn settings(&self) -> RepoResult<LiveStreamSettings> {
        Ok(self.settings.read().await.clone())
    }

    async fn update_settings(
        &self,
        input: &UpdateLiveStreamSettings,
    ) -> RepoResult<LiveStreamSettings> {
        let mut settings = self.settings.write().await;
        settings.apply(input, Utc::now());
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let repo = MemoryLiveStreamRepository::default();
        let before = repo.settings().await.unwrap();

        let patch = UpdateLiveStreamSettings {
            title: Some("Easter Sunday Service".to_string()),
            enable_dvr: Some(false),
            ..Default::default()
        };
        let after = repo.update_settings(&patch).await.unwrap();

        assert_eq!(after.title, "Easter Sunday Service");
        assert!(!after.enable_dvr);
        assert_eq!(after.stream_id, before.stream_id);
        assert_eq!(after.resolution, before.resolution);
        assert_eq!(repo.settings().await.unwrap(), after);
    }
}
