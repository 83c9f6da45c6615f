// Video service - catalog mutations and lookups by id
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{Comedian, ComedianVideoCount, NewVideo, Video};
use crate::store::SharedStore;

pub struct VideoService {
    store: SharedStore,
}

/// Video with its tag names
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    pub tags: Vec<String>,
}

impl VideoService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Validate and insert a video, returning it with its generated id.
    pub async fn create_video(&self, video: NewVideo) -> Result<Video> {
        let video = video.normalized();
        video.validate()?;

        let created = self.store.insert_video(&video).await?;
        tracing::info!(
            video_id = %created.id,
            comedian_id = %created.comedian_id,
            is_active = created.is_active,
            is_ready = created.is_ready,
            tags = video.tags.len(),
            "Video created"
        );

        Ok(created)
    }

    pub async fn get_video_by_id(&self, id: Uuid) -> Result<Video> {
        self.store
            .find_video(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }

    pub async fn get_video_detail(&self, id: Uuid) -> Result<VideoDetail> {
        let video = self.get_video_by_id(id).await?;
        let tags = self.store.video_tag_names(id).await?;
        Ok(VideoDetail { video, tags })
    }

    /// Delete a video by id, returning the removed row.
    pub async fn delete_video(&self, id: Uuid) -> Result<Video> {
        let deleted = self
            .store
            .delete_video(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

        tracing::info!(video_id = %id, "Video deleted");
        Ok(deleted)
    }

    pub async fn create_comedian(&self, name: &str) -> Result<Comedian> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("comedian name is required".to_string()));
        }

        let comedian = self.store.insert_comedian(name).await?;
        tracing::info!(comedian_id = %comedian.id, name = %comedian.name, "Comedian created");
        Ok(comedian)
    }

    /// Active video count per comedian, for comedians with at least one.
    pub async fn count_comedian_video_occurrences(&self) -> Result<Vec<ComedianVideoCount>> {
        self.store.comedian_video_counts().await
    }
}
