//! Video Promotion Job
//!
//! Publishes the catalog one video at a time: each tick activates the ready
//! video that has waited longest (first in, first out). A tick with nothing
//! ready is a no-op.

use std::time::{Duration, Instant};

use tokio::time::{interval, MissedTickBehavior};

use crate::error::Result;
use crate::models::Video;
use crate::store::{CatalogStore, SharedStore};

/// Run one promotion tick. Returns the video that was published, if any.
pub async fn promote_next_ready(store: &dyn CatalogStore) -> Result<Option<Video>> {
    match store.promote_oldest_ready().await? {
        Some(video) => {
            tracing::info!(
                video_id = %video.id,
                title = %video.title,
                queued_at = %video.created_at,
                "Promoted ready video to active"
            );
            Ok(Some(video))
        }
        None => {
            tracing::info!("No ready video to promote at the moment");
            Ok(None)
        }
    }
}

pub async fn start_promotion_job(store: SharedStore, every: Duration) {
    tracing::info!(
        interval_secs = every.as_secs(),
        "Starting video promotion background job"
    );

    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; promotion waits a full period.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let tick_start = Instant::now();
        match promote_next_ready(store.as_ref()).await {
            Ok(promoted) => {
                tracing::debug!(
                    promoted = promoted.is_some(),
                    duration_ms = tick_start.elapsed().as_millis() as u64,
                    "Promotion tick completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    duration_ms = tick_start.elapsed().as_millis() as u64,
                    "Promotion tick failed"
                );
            }
        }
    }
}
