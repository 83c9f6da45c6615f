//! Shared fixtures for catalog integration tests.
//!
//! `memory_store()` keeps `created_at` strictly increasing in insertion
//! order, so "inserted later" means "newer". The fixtures themselves only go
//! through the services and work with any store.

#![allow(dead_code)]

pub mod properties;

use std::sync::Arc;

use comedy_catalog::models::{Comedian, NewVideo, Video};
use comedy_catalog::services::VideoService;
use comedy_catalog::store::{MemoryCatalogStore, SharedStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pending,
    Ready,
    Active,
}

pub fn memory_store() -> SharedStore {
    Arc::new(MemoryCatalogStore::new())
}

pub async fn comedian(store: &SharedStore, name: &str) -> Comedian {
    VideoService::new(store.clone())
        .create_comedian(name)
        .await
        .expect("Failed to create comedian")
}

/// Insert a video in the given stage with optional tags.
pub async fn video(
    store: &SharedStore,
    comedian: &Comedian,
    title: &str,
    stage: Stage,
    tags: &[&str],
) -> Video {
    let slug: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let mut new_video = NewVideo::new(
        comedian.id,
        title,
        format!("https://www.youtube.com/watch?v={}", slug),
    )
    .with_tags(tags.iter().copied());

    match stage {
        Stage::Pending => {}
        Stage::Ready => new_video = new_video.ready(),
        Stage::Active => new_video = new_video.active(),
    }

    VideoService::new(store.clone())
        .create_video(new_video)
        .await
        .expect("Failed to create video")
}

/// Insert `count` active videos titled "{prefix} {n}".
pub async fn active_videos(
    store: &SharedStore,
    comedian: &Comedian,
    prefix: &str,
    count: usize,
) -> Vec<Video> {
    let mut videos = Vec::with_capacity(count);
    for n in 0..count {
        videos.push(video(store, comedian, &format!("{} {}", prefix, n), Stage::Active, &[]).await);
    }
    videos
}
