use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A catalogued video. Only `is_active` rows are publicly visible.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub comedian_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub is_active: bool,
    pub is_ready: bool,
    pub created_at: DateTime<Utc>,
}

/// Publication state derived from the two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoState {
    Pending,
    Ready,
    Published,
}

impl Video {
    pub fn state(&self) -> VideoState {
        match (self.is_active, self.is_ready) {
            (true, _) => VideoState::Published,
            (false, true) => VideoState::Ready,
            (false, false) => VideoState::Pending,
        }
    }
}

/// Input for inserting a video directly into the catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVideo {
    pub comedian_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[serde(default, alias = "isActive")]
    pub is_active: bool,
    #[serde(default, alias = "isReady")]
    pub is_ready: bool,
    /// Tag names; unknown tags are created on insert.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewVideo {
    pub fn new(comedian_id: Uuid, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            comedian_id,
            title: title.into(),
            link: link.into(),
            description: None,
            is_active: false,
            is_ready: false,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn active(mut self) -> Self {
        self.is_active = true;
        self.is_ready = true;
        self
    }

    pub fn ready(mut self) -> Self {
        self.is_ready = true;
        self
    }

    /// Trim free-text fields, drop empty descriptions and blank or duplicate tags.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.link = self.link.trim().to_string();
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_flags() {
        let mut video = Video {
            id: Uuid::new_v4(),
            comedian_id: Uuid::new_v4(),
            title: "Bit".into(),
            description: None,
            link: "https://www.youtube.com/watch?v=abc".into(),
            is_active: false,
            is_ready: false,
            created_at: Utc::now(),
        };
        assert_eq!(video.state(), VideoState::Pending);

        video.is_ready = true;
        assert_eq!(video.state(), VideoState::Ready);

        video.is_active = true;
        assert_eq!(video.state(), VideoState::Published);
    }

    #[test]
    fn validation_rejects_blank_title_and_bad_link() {
        let comedian = Uuid::new_v4();

        let blank = NewVideo::new(comedian, "   ", "https://youtube.com/watch?v=1").normalized();
        assert!(blank.validate().is_err());

        let bad_link = NewVideo::new(comedian, "Special", "not a url").normalized();
        assert!(bad_link.validate().is_err());

        let ok = NewVideo::new(comedian, " Special ", "https://youtube.com/watch?v=1").normalized();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.title, "Special");
    }

    #[test]
    fn normalized_dedupes_tags() {
        let video = NewVideo::new(Uuid::new_v4(), "Special", "https://youtube.com/watch?v=1")
            .with_description("  ")
            .with_tags(["crowd work", " crowd work", "", "storytelling"])
            .normalized();

        assert_eq!(video.description, None);
        assert_eq!(video.tags, vec!["crowd work", "storytelling"]);
    }

    #[test]
    fn deserializes_camel_case_flags() {
        let video: NewVideo = serde_json::from_value(serde_json::json!({
            "comedian_id": Uuid::nil(),
            "title": "Special",
            "link": "https://youtube.com/watch?v=1",
            "description": "Live",
            "isActive": true,
            "isReady": true
        }))
        .unwrap();

        assert!(video.is_active);
        assert!(video.is_ready);
        assert!(video.tags.is_empty());
    }
}
