use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum number of outstanding submissions kept for review.
pub const MAX_PENDING_SUBMISSIONS: i64 = 100;

/// A user-submitted link awaiting review.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PendingSubmission {
    pub id: Uuid,
    pub youtube_link: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub youtube_link: String,
    pub message: Option<String>,
}
