// Stats service - catalog totals
use crate::error::Result;
use crate::models::CatalogStats;
use crate::store::SharedStore;

pub struct StatsService {
    store: SharedStore,
}

impl StatsService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn catalog_stats(&self) -> Result<CatalogStats> {
        let total_video_count = self.store.count_active_videos().await?;
        let total_comedian_count = self.store.count_comedians().await?;
        let total_tag_count = self.store.count_tags().await?;
        let video_count_by_comedian = self.store.comedian_video_counts().await?;

        Ok(CatalogStats {
            total_video_count,
            total_comedian_count,
            total_tag_count,
            video_count_by_comedian,
        })
    }
}
