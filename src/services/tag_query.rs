use crate::error::Result;
use crate::models::{Tag, TagCount};
use crate::store::SharedStore;

/// Tags need this many videos to show up in the popular-tag listing.
pub const DEFAULT_MIN_TAG_COUNT: i64 = 5;

pub struct TagQueryService {
    store: SharedStore,
}

impl TagQueryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.store.list_tags().await
    }

    /// Tags carried by at least `min_count` videos, most used first.
    pub async fn list_tags_with_min_count(&self, min_count: i64) -> Result<Vec<TagCount>> {
        self.store.list_tag_counts(min_count).await
    }
}
