// Video query service - public, read-only views over active videos
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comedian, Page, Video};
use crate::store::SharedStore;

pub struct VideoQueryService {
    store: SharedStore,
}

impl VideoQueryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Active videos, newest first.
    pub async fn list_active_videos(&self, page: Page) -> Result<Vec<Video>> {
        self.store.list_active_videos(page).await
    }

    /// Active videos whose title, description or a tag name contains `term`,
    /// ignoring case. The term is matched as given, surrounding spaces
    /// included. A blank term lists every active video.
    pub async fn search_active_videos(&self, term: &str, page: Page) -> Result<Vec<Video>> {
        if term.trim().is_empty() {
            return self.list_active_videos(page).await;
        }

        let videos = self.store.search_active_videos(term, page).await?;
        tracing::debug!(term, page = page.page(), results = videos.len(), "Video search");

        Ok(videos)
    }

    /// Active videos of one comedian, newest first.
    pub async fn list_videos_by_comedian(&self, comedian_id: Uuid, page: Page) -> Result<Vec<Video>> {
        self.store
            .list_active_videos_by_comedian(comedian_id, page)
            .await
    }

    pub async fn count_videos_by_comedian(&self, comedian_id: Uuid) -> Result<i64> {
        self.store.count_active_videos_by_comedian(comedian_id).await
    }

    pub async fn count_all_active_videos(&self) -> Result<i64> {
        self.store.count_active_videos().await
    }

    pub async fn random_active_video(&self) -> Result<Option<Video>> {
        self.store.random_active_video().await
    }

    pub async fn list_comedians(&self) -> Result<Vec<Comedian>> {
        self.store.list_comedians().await
    }
}
