//! Storage seam for the catalog.
//!
//! Services receive an explicit store handle instead of reaching for a global
//! session. `PgCatalogStore` is the production backend; `MemoryCatalogStore`
//! implements the same semantics in-process.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Comedian, ComedianVideoCount, NewSubmission, NewVideo, Page, PendingSubmission, Tag, TagCount,
    Video,
};

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

pub type SharedStore = Arc<dyn CatalogStore>;

/// Outcome of a capacity-guarded submission insert.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted(PendingSubmission),
    /// Nothing was stored; `outstanding` submissions already fill the queue.
    QueueFull { outstanding: i64 },
}

/// Every storage operation the query, mutation and promotion code relies on.
///
/// Listing operations only ever return active videos. Each call is its own
/// unit of work: nothing is held between calls.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active videos, newest first.
    async fn list_active_videos(&self, page: Page) -> Result<Vec<Video>>;

    /// Active videos whose title, description or any tag name contains
    /// `term` case-insensitively, newest first, each video at most once.
    async fn search_active_videos(&self, term: &str, page: Page) -> Result<Vec<Video>>;

    /// Active videos of one comedian, newest first.
    async fn list_active_videos_by_comedian(
        &self,
        comedian_id: Uuid,
        page: Page,
    ) -> Result<Vec<Video>>;

    async fn count_active_videos_by_comedian(&self, comedian_id: Uuid) -> Result<i64>;

    async fn count_active_videos(&self) -> Result<i64>;

    async fn random_active_video(&self) -> Result<Option<Video>>;

    /// All tags, name ascending.
    async fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Tags used on at least `min_count` videos, count descending then name ascending.
    async fn list_tag_counts(&self, min_count: i64) -> Result<Vec<TagCount>>;

    async fn count_tags(&self) -> Result<i64>;

    async fn insert_comedian(&self, name: &str) -> Result<Comedian>;

    async fn find_comedian(&self, id: Uuid) -> Result<Option<Comedian>>;

    /// All comedians, name ascending.
    async fn list_comedians(&self) -> Result<Vec<Comedian>>;

    async fn count_comedians(&self) -> Result<i64>;

    /// Comedians with at least one active video, with that count, name ascending.
    async fn comedian_video_counts(&self) -> Result<Vec<ComedianVideoCount>>;

    /// Insert a video and link its tags, creating missing tags. The comedian
    /// must exist.
    async fn insert_video(&self, video: &NewVideo) -> Result<Video>;

    async fn find_video(&self, id: Uuid) -> Result<Option<Video>>;

    /// Tag names on a video, name ascending.
    async fn video_tag_names(&self, video_id: Uuid) -> Result<Vec<String>>;

    /// Remove a video and its tag links. `None` when no such video exists.
    async fn delete_video(&self, id: Uuid) -> Result<Option<Video>>;

    async fn count_submissions(&self) -> Result<i64>;

    /// Store a submission unless `capacity` submissions are already
    /// outstanding. The count and the insert are atomic.
    async fn insert_submission(
        &self,
        submission: &NewSubmission,
        capacity: i64,
    ) -> Result<SubmissionOutcome>;

    /// Activate the ready, inactive video with the oldest `created_at`.
    async fn promote_oldest_ready(&self) -> Result<Option<Video>>;
}
