use crate::error::{AppError, Result};
use crate::models::{NewSubmission, PendingSubmission, MAX_PENDING_SUBMISSIONS};
use crate::store::{SharedStore, SubmissionOutcome};

/// Accepts user-submitted video links into a bounded review queue.
pub struct SubmissionService {
    store: SharedStore,
    capacity: i64,
}

impl SubmissionService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            capacity: MAX_PENDING_SUBMISSIONS,
        }
    }

    /// Queue a link for review.
    ///
    /// The link check is a plain substring match on "youtube"; it does not
    /// parse the URL.
    pub async fn submit_pending_link(
        &self,
        link: Option<&str>,
        message: Option<&str>,
    ) -> Result<PendingSubmission> {
        let link = match link.map(str::trim) {
            Some(link) if !link.is_empty() => link,
            _ => {
                tracing::warn!("Submission rejected: no link provided");
                return Err(AppError::Validation("youtube link is required".to_string()));
            }
        };

        if !link.to_lowercase().contains("youtube") {
            tracing::warn!(link, "Submission rejected: not a YouTube link");
            return Err(AppError::Validation(
                "link must point to youtube".to_string(),
            ));
        }

        let submission = NewSubmission {
            youtube_link: link.to_string(),
            message: message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from),
        };

        match self.store.insert_submission(&submission, self.capacity).await? {
            SubmissionOutcome::Accepted(stored) => {
                tracing::info!(submission_id = %stored.id, "Submission queued");
                Ok(stored)
            }
            SubmissionOutcome::QueueFull { outstanding } => {
                tracing::warn!(outstanding, capacity = self.capacity, "Submission queue is full");
                Err(AppError::CapacityExceeded(format!(
                    "{} submissions are already awaiting review",
                    outstanding
                )))
            }
        }
    }

    pub async fn pending_count(&self) -> Result<i64> {
        self.store.count_submissions().await
    }
}
