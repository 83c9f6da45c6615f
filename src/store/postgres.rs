use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    Comedian, ComedianVideoCount, NewSubmission, NewVideo, Page, PendingSubmission, Tag, TagCount,
    Video,
};

use super::{CatalogStore, SubmissionOutcome};

/// PostgreSQL-backed catalog store.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE metacharacters so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_active_videos(&self, page: Page) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, comedian_id, title, description, link, is_active, is_ready, created_at
            FROM videos
            WHERE is_active
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn search_active_videos(&self, term: &str, page: Page) -> Result<Vec<Video>> {
        // EXISTS keeps untagged videos eligible and avoids one row per matching tag.
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT v.id, v.comedian_id, v.title, v.description, v.link,
                   v.is_active, v.is_ready, v.created_at
            FROM videos v
            WHERE v.is_active
              AND (
                v.title ILIKE $1
                OR v.description ILIKE $1
                OR EXISTS (
                    SELECT 1
                    FROM video_tags vt
                    JOIN tags t ON t.id = vt.tag_id
                    WHERE vt.video_id = v.id AND t.name ILIKE $1
                )
              )
            ORDER BY v.created_at DESC, v.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(like_pattern(term))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn list_active_videos_by_comedian(
        &self,
        comedian_id: Uuid,
        page: Page,
    ) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, comedian_id, title, description, link, is_active, is_ready, created_at
            FROM videos
            WHERE is_active AND comedian_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(comedian_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn count_active_videos_by_comedian(&self, comedian_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE is_active AND comedian_id = $1")
                .bind(comedian_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_active_videos(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE is_active")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn random_active_video(&self) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, comedian_id, title, description, link, is_active, is_ready, created_at
            FROM videos
            WHERE is_active
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    async fn list_tag_counts(&self, min_count: i64) -> Result<Vec<TagCount>> {
        let counts = sqlx::query_as::<_, TagCount>(
            r#"
            SELECT t.name, COUNT(vt.video_id) AS count
            FROM tags t
            JOIN video_tags vt ON vt.tag_id = t.id
            GROUP BY t.name
            HAVING COUNT(vt.video_id) >= $1
            ORDER BY count DESC, t.name ASC
            "#,
        )
        .bind(min_count)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn count_tags(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_comedian(&self, name: &str) -> Result<Comedian> {
        let comedian = sqlx::query_as::<_, Comedian>(
            "INSERT INTO comedians (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(comedian)
    }

    async fn find_comedian(&self, id: Uuid) -> Result<Option<Comedian>> {
        let comedian =
            sqlx::query_as::<_, Comedian>("SELECT id, name FROM comedians WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(comedian)
    }

    async fn list_comedians(&self) -> Result<Vec<Comedian>> {
        let comedians =
            sqlx::query_as::<_, Comedian>("SELECT id, name FROM comedians ORDER BY name ASC, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(comedians)
    }

    async fn count_comedians(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comedians")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn comedian_video_counts(&self) -> Result<Vec<ComedianVideoCount>> {
        let counts = sqlx::query_as::<_, ComedianVideoCount>(
            r#"
            SELECT c.id, c.name, COUNT(v.id) AS video_count
            FROM comedians c
            JOIN videos v ON v.comedian_id = c.id AND v.is_active
            GROUP BY c.id, c.name
            ORDER BY c.name ASC, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn insert_video(&self, video: &NewVideo) -> Result<Video> {
        let mut tx = self.pool.begin().await?;

        let comedian_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM comedians WHERE id = $1)")
                .bind(video.comedian_id)
                .fetch_one(&mut *tx)
                .await?;

        if !comedian_exists {
            return Err(AppError::NotFound(format!(
                "Comedian {} not found",
                video.comedian_id
            )));
        }

        let inserted = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (comedian_id, title, description, link, is_active, is_ready)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, comedian_id, title, description, link, is_active, is_ready, created_at
            "#,
        )
        .bind(video.comedian_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.link)
        .bind(video.is_active)
        .bind(video.is_ready)
        .fetch_one(&mut *tx)
        .await?;

        for name in &video.tags {
            sqlx::query("INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO video_tags (video_id, tag_id)
                SELECT $1, id FROM tags WHERE name = $2
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(inserted.id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_video(&self, id: Uuid) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, comedian_id, title, description, link, is_active, is_ready, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn video_tag_names(&self, video_id: Uuid) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT t.name
            FROM tags t
            JOIN video_tags vt ON vt.tag_id = t.id
            WHERE vt.video_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn delete_video(&self, id: Uuid) -> Result<Option<Video>> {
        // video_tags rows go with the video through ON DELETE CASCADE.
        let video = sqlx::query_as::<_, Video>(
            r#"
            DELETE FROM videos
            WHERE id = $1
            RETURNING id, comedian_id, title, description, link, is_active, is_ready, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn count_submissions(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pending_submissions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_submission(
        &self,
        submission: &NewSubmission,
        capacity: i64,
    ) -> Result<SubmissionOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serialises concurrent submitters so the count cannot go stale before the insert.
        sqlx::query("LOCK TABLE pending_submissions IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let outstanding: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pending_submissions")
            .fetch_one(&mut *tx)
            .await?;

        if outstanding >= capacity {
            tx.rollback().await?;
            return Ok(SubmissionOutcome::QueueFull { outstanding });
        }

        let stored = sqlx::query_as::<_, PendingSubmission>(
            r#"
            INSERT INTO pending_submissions (youtube_link, message)
            VALUES ($1, $2)
            RETURNING id, youtube_link, message, created_at
            "#,
        )
        .bind(&submission.youtube_link)
        .bind(&submission.message)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(SubmissionOutcome::Accepted(stored))
    }

    async fn promote_oldest_ready(&self) -> Result<Option<Video>> {
        // SKIP LOCKED: a concurrent tick moves on to the next candidate instead
        // of activating the same row twice.
        let video = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET is_active = TRUE
            WHERE id = (
                SELECT id
                FROM videos
                WHERE is_ready AND NOT is_active
                ORDER BY created_at ASC, id
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, comedian_id, title, description, link, is_active, is_ready, created_at
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }
}
