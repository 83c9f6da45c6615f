use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    Comedian, ComedianVideoCount, NewSubmission, NewVideo, Page, PendingSubmission, Tag, TagCount,
    Video,
};

use super::{CatalogStore, SubmissionOutcome};

#[derive(Default)]
struct Tables {
    comedians: Vec<Comedian>,
    videos: Vec<Video>,
    tags: Vec<Tag>,
    /// (video_id, tag_id)
    video_tags: Vec<(Uuid, Uuid)>,
    submissions: Vec<PendingSubmission>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Wall-clock time, bumped so that insertion order and `created_at` order agree.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }

    fn tag_names_of(&self, video_id: Uuid) -> impl Iterator<Item = &str> {
        self.video_tags
            .iter()
            .filter(move |(v, _)| *v == video_id)
            .filter_map(move |(_, t)| self.tags.iter().find(|tag| tag.id == *t))
            .map(|tag| tag.name.as_str())
    }

    fn active_newest_first<F>(&self, predicate: F) -> Vec<&Video>
    where
        F: Fn(&Video) -> bool,
    {
        let mut videos: Vec<&Video> = self
            .videos
            .iter()
            .filter(|v| v.is_active && predicate(*v))
            .collect();
        videos.sort_by_key(|v| (Reverse(v.created_at), v.id));
        videos
    }
}

fn window(videos: Vec<&Video>, page: Page) -> Vec<Video> {
    videos
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

/// In-process catalog store with the same semantics as the PostgreSQL backend.
#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_active_videos(&self, page: Page) -> Result<Vec<Video>> {
        let tables = self.tables.read().await;
        Ok(window(tables.active_newest_first(|_| true), page))
    }

    async fn search_active_videos(&self, term: &str, page: Page) -> Result<Vec<Video>> {
        let tables = self.tables.read().await;
        let needle = term.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&needle);

        let matches = tables.active_newest_first(|v| {
            contains(&v.title)
                || v.description.as_deref().is_some_and(contains)
                || tables.tag_names_of(v.id).any(contains)
        });

        Ok(window(matches, page))
    }

    async fn list_active_videos_by_comedian(
        &self,
        comedian_id: Uuid,
        page: Page,
    ) -> Result<Vec<Video>> {
        let tables = self.tables.read().await;
        Ok(window(
            tables.active_newest_first(|v| v.comedian_id == comedian_id),
            page,
        ))
    }

    async fn count_active_videos_by_comedian(&self, comedian_id: Uuid) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .videos
            .iter()
            .filter(|v| v.is_active && v.comedian_id == comedian_id)
            .count() as i64)
    }

    async fn count_active_videos(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.videos.iter().filter(|v| v.is_active).count() as i64)
    }

    async fn random_active_video(&self) -> Result<Option<Video>> {
        let tables = self.tables.read().await;
        let active: Vec<&Video> = tables.videos.iter().filter(|v| v.is_active).collect();
        Ok(active.choose(&mut rand::thread_rng()).map(|v| (*v).clone()))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tables = self.tables.read().await;
        let mut tags = tables.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn list_tag_counts(&self, min_count: i64) -> Result<Vec<TagCount>> {
        let tables = self.tables.read().await;

        let mut by_tag: HashMap<Uuid, i64> = HashMap::new();
        for (_, tag_id) in &tables.video_tags {
            *by_tag.entry(*tag_id).or_default() += 1;
        }

        let mut counts: Vec<TagCount> = tables
            .tags
            .iter()
            .filter_map(|tag| {
                let count = by_tag.get(&tag.id).copied().unwrap_or(0);
                (count > 0 && count >= min_count).then(|| TagCount {
                    name: tag.name.clone(),
                    count,
                })
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        Ok(counts)
    }

    async fn count_tags(&self) -> Result<i64> {
        Ok(self.tables.read().await.tags.len() as i64)
    }

    async fn insert_comedian(&self, name: &str) -> Result<Comedian> {
        let mut tables = self.tables.write().await;
        let comedian = Comedian {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        tables.comedians.push(comedian.clone());
        Ok(comedian)
    }

    async fn find_comedian(&self, id: Uuid) -> Result<Option<Comedian>> {
        let tables = self.tables.read().await;
        Ok(tables.comedians.iter().find(|c| c.id == id).cloned())
    }

    async fn list_comedians(&self) -> Result<Vec<Comedian>> {
        let tables = self.tables.read().await;
        let mut comedians = tables.comedians.clone();
        comedians.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(comedians)
    }

    async fn count_comedians(&self) -> Result<i64> {
        Ok(self.tables.read().await.comedians.len() as i64)
    }

    async fn comedian_video_counts(&self) -> Result<Vec<ComedianVideoCount>> {
        let tables = self.tables.read().await;

        let mut counts: Vec<ComedianVideoCount> = tables
            .comedians
            .iter()
            .filter_map(|c| {
                let video_count = tables
                    .videos
                    .iter()
                    .filter(|v| v.is_active && v.comedian_id == c.id)
                    .count() as i64;
                (video_count > 0).then(|| ComedianVideoCount {
                    id: c.id,
                    name: c.name.clone(),
                    video_count,
                })
            })
            .collect();
        counts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(counts)
    }

    async fn insert_video(&self, video: &NewVideo) -> Result<Video> {
        let mut tables = self.tables.write().await;

        if !tables.comedians.iter().any(|c| c.id == video.comedian_id) {
            return Err(AppError::NotFound(format!(
                "Comedian {} not found",
                video.comedian_id
            )));
        }

        let inserted = Video {
            id: Uuid::new_v4(),
            comedian_id: video.comedian_id,
            title: video.title.clone(),
            description: video.description.clone(),
            link: video.link.clone(),
            is_active: video.is_active,
            is_ready: video.is_ready,
            created_at: tables.next_timestamp(),
        };
        tables.videos.push(inserted.clone());

        for name in &video.tags {
            let existing = tables.tags.iter().find(|t| &t.name == name).map(|t| t.id);
            let tag_id = match existing {
                Some(id) => id,
                None => {
                    let tag = Tag {
                        id: Uuid::new_v4(),
                        name: name.clone(),
                    };
                    let id = tag.id;
                    tables.tags.push(tag);
                    id
                }
            };
            if !tables.video_tags.contains(&(inserted.id, tag_id)) {
                tables.video_tags.push((inserted.id, tag_id));
            }
        }

        Ok(inserted)
    }

    async fn find_video(&self, id: Uuid) -> Result<Option<Video>> {
        let tables = self.tables.read().await;
        Ok(tables.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn video_tag_names(&self, video_id: Uuid) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        let mut names: Vec<String> = tables.tag_names_of(video_id).map(String::from).collect();
        names.sort();
        Ok(names)
    }

    async fn delete_video(&self, id: Uuid) -> Result<Option<Video>> {
        let mut tables = self.tables.write().await;

        let Some(position) = tables.videos.iter().position(|v| v.id == id) else {
            return Ok(None);
        };
        let removed = tables.videos.remove(position);
        tables.video_tags.retain(|(video_id, _)| *video_id != id);

        Ok(Some(removed))
    }

    async fn count_submissions(&self) -> Result<i64> {
        Ok(self.tables.read().await.submissions.len() as i64)
    }

    async fn insert_submission(
        &self,
        submission: &NewSubmission,
        capacity: i64,
    ) -> Result<SubmissionOutcome> {
        let mut tables = self.tables.write().await;

        let outstanding = tables.submissions.len() as i64;
        if outstanding >= capacity {
            return Ok(SubmissionOutcome::QueueFull { outstanding });
        }

        let stored = PendingSubmission {
            id: Uuid::new_v4(),
            youtube_link: submission.youtube_link.clone(),
            message: submission.message.clone(),
            created_at: tables.next_timestamp(),
        };
        tables.submissions.push(stored.clone());

        Ok(SubmissionOutcome::Accepted(stored))
    }

    async fn promote_oldest_ready(&self) -> Result<Option<Video>> {
        let mut tables = self.tables.write().await;

        let candidate = tables
            .videos
            .iter_mut()
            .filter(|v| v.is_ready && !v.is_active)
            .min_by_key(|v| (v.created_at, v.id));

        Ok(candidate.map(|video| {
            video.is_active = true;
            video.clone()
        }))
    }
}
