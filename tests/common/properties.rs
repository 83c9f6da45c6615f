//! Catalog properties every `CatalogStore` backend must satisfy.
//!
//! Each check expects an empty catalog and builds its own fixtures through
//! the services, so the same assertions run against the in-memory store and
//! against PostgreSQL.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use comedy_catalog::models::Page;
use comedy_catalog::services::{
    TagQueryService, VideoQueryService, VideoService, DEFAULT_MIN_TAG_COUNT,
};
use comedy_catalog::store::SharedStore;
use uuid::Uuid;

use super::{active_videos, comedian, video, Stage};

/// Active rows interleaved with pending and ready ones page out newest first,
/// never repeat, and add up to the active count.
pub async fn active_listing_pages_cover_active_only(store: &SharedStore) {
    let comic = comedian(store, "Maria Bamford").await;

    let mut active = Vec::new();
    for n in 0..23 {
        active.push(video(store, &comic, &format!("Set {}", n), Stage::Active, &[]).await);
        match n % 6 {
            0 => {
                video(store, &comic, &format!("Draft {}", n), Stage::Pending, &[]).await;
            }
            3 => {
                video(store, &comic, &format!("Queued {}", n), Stage::Ready, &[]).await;
            }
            _ => {}
        }
    }
    let expected: HashSet<Uuid> = active.iter().map(|v| v.id).collect();

    let queries = VideoQueryService::new(store.clone());
    assert_eq!(queries.count_all_active_videos().await.unwrap(), 23);

    for size in [10, 7] {
        let mut seen = HashSet::new();
        let mut previous: Option<DateTime<Utc>> = None;
        let mut number = 1;
        loop {
            let page = Page::new(number, size).unwrap();
            let videos = queries.list_active_videos(page).await.unwrap();
            assert!(videos.len() <= size as usize);
            if videos.is_empty() {
                break;
            }
            for v in &videos {
                assert!(v.is_active, "{} is not active", v.title);
                if let Some(prev) = previous {
                    assert!(prev >= v.created_at, "{} listed out of order", v.title);
                }
                previous = Some(v.created_at);
                assert!(seen.insert(v.id), "{} listed twice", v.title);
            }
            number += 1;
        }
        assert_eq!(seen, expected, "page size {}", size);
    }
}

/// Tags on 6, 5 and 4 videos: the default threshold keeps the first two.
pub async fn tag_threshold_keeps_counts_at_or_above_minimum(store: &SharedStore) {
    let comic = comedian(store, "Tig Notaro").await;

    for n in 0..6 {
        let mut tags = vec!["six"];
        if n < 5 {
            tags.push("five");
        }
        if n < 4 {
            tags.push("four");
        }
        video(store, &comic, &format!("Clip {}", n), Stage::Active, &tags).await;
    }

    let counts = TagQueryService::new(store.clone())
        .list_tags_with_min_count(DEFAULT_MIN_TAG_COUNT)
        .await
        .unwrap();
    let pairs: Vec<(&str, i64)> = counts.iter().map(|c| (c.name.as_str(), c.count)).collect();
    assert_eq!(pairs, vec![("six", 6), ("five", 5)]);

    let everything = TagQueryService::new(store.clone())
        .list_tags_with_min_count(1)
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
}

/// A comedian whose only video is not active is left out of the occurrences.
pub async fn comedian_counts_skip_inactive_only_comedians(store: &SharedStore) {
    let maria = comedian(store, "Maria Bamford").await;
    let mitch = comedian(store, "Mitch Hedberg").await;
    let andy = comedian(store, "Andy Kaufman").await;

    active_videos(store, &maria, "Maria", 2).await;
    active_videos(store, &mitch, "Mitch", 1).await;
    video(store, &mitch, "Mitch queued", Stage::Ready, &[]).await;
    video(store, &andy, "Kaufman pending", Stage::Pending, &[]).await;

    let counts = VideoService::new(store.clone())
        .count_comedian_video_occurrences()
        .await
        .unwrap();
    let rows: Vec<(Uuid, &str, i64)> = counts
        .iter()
        .map(|c| (c.id, c.name.as_str(), c.video_count))
        .collect();

    assert_eq!(
        rows,
        vec![(maria.id, "Maria Bamford", 2), (mitch.id, "Mitch Hedberg", 1)]
    );
}

/// Tag listing is name-ordered and a video's detail carries its sorted tags.
pub async fn tag_listing_and_video_tags_are_sorted(store: &SharedStore) {
    let comic = comedian(store, "Maria Bamford").await;
    let tagged = video(
        store,
        &comic,
        "One",
        Stage::Active,
        &["storytelling", "crowd work"],
    )
    .await;
    video(store, &comic, "Two", Stage::Pending, &["absurdist", "storytelling"]).await;
    let bare = video(store, &comic, "Three", Stage::Active, &[]).await;

    let tags = TagQueryService::new(store.clone()).list_tags().await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["absurdist", "crowd work", "storytelling"]);

    let videos = VideoService::new(store.clone());
    let detail = videos.get_video_detail(tagged.id).await.unwrap();
    assert_eq!(detail.tags, vec!["crowd work", "storytelling"]);
    assert!(videos.get_video_detail(bare.id).await.unwrap().tags.is_empty());
}

/// The random pick only ever returns an active video.
pub async fn random_pick_is_active_or_none(store: &SharedStore) {
    let comic = comedian(store, "Mitch Hedberg").await;
    video(store, &comic, "Draft", Stage::Pending, &[]).await;
    video(store, &comic, "Queued", Stage::Ready, &[]).await;

    let queries = VideoQueryService::new(store.clone());
    assert!(queries.random_active_video().await.unwrap().is_none());

    let live = active_videos(store, &comic, "Live", 3).await;
    let ids: HashSet<Uuid> = live.iter().map(|v| v.id).collect();
    for _ in 0..10 {
        let picked = queries.random_active_video().await.unwrap().unwrap();
        assert!(ids.contains(&picked.id));
    }
}
