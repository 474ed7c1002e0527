//! Post model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::post_status;

use super::ParseEnumError;

/// Post database model
///
/// `excerpt`, `reading_time_minutes` and `published_at` are optional on the
/// struct so a post can be built before its derived fields exist; after
/// `lifecycle::prepare_for_save` they are filled in.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub anime_name: String,
    pub category_id: Option<Uuid>,
    pub content: String,
    pub excerpt: Option<String>,
    pub reading_time_minutes: Option<i32>,
    #[sqlx(try_from = "String")]
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub views: i64,
    pub likes_count: i64,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// A fresh, unsaved post with empty counters
    pub fn new(created_by: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            anime_name: String::new(),
            category_id: None,
            content: String::new(),
            excerpt: None,
            reading_time_minutes: None,
            status: PostStatus::default(),
            published_at: None,
            is_deleted: false,
            views: 0,
            likes_count: 0,
            season_number: None,
            episode_number: None,
            tags: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Visible in public listings
    pub fn is_public(&self) -> bool {
        self.status == PostStatus::Published && !self.is_deleted
    }
}

/// Post lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    #[default]
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => post_status::DRAFT,
            Self::Scheduled => post_status::SCHEDULED,
            Self::Published => post_status::PUBLISHED,
        }
    }

    /// Whether a post in this status may move to `next`.
    ///
    /// Staying in the same status is always allowed.
    pub fn can_transition_to(&self, next: PostStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, _)
                | (Self::Scheduled, Self::Scheduled | Self::Published)
                | (Self::Published, Self::Published)
        )
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            post_status::DRAFT => Ok(Self::Draft),
            post_status::SCHEDULED => Ok(Self::Scheduled),
            post_status::PUBLISHED => Ok(Self::Published),
            other => Err(ParseEnumError::new("status", other)),
        }
    }
}

impl TryFrom<String> for PostStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sort order for post listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostOrder {
    #[default]
    Newest,
    MostViewed,
    MostLiked,
}

impl PostOrder {
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            Self::Newest => "published_at DESC NULLS LAST, created_at DESC",
            Self::MostViewed => "views DESC, published_at DESC NULLS LAST",
            Self::MostLiked => "likes_count DESC, published_at DESC NULLS LAST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_published() {
        assert_eq!(PostStatus::default(), PostStatus::Published);
        let post = Post::new(Uuid::new_v4(), Utc::now());
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.views, 0);
        assert_eq!(post.likes_count, 0);
    }

    #[test]
    fn test_status_transitions() {
        use PostStatus::*;

        assert!(Draft.can_transition_to(Scheduled));
        assert!(Draft.can_transition_to(Published));
        assert!(Scheduled.can_transition_to(Published));
        assert!(Published.can_transition_to(Published));

        assert!(!Published.can_transition_to(Draft));
        assert!(!Published.can_transition_to(Scheduled));
        assert!(!Scheduled.can_transition_to(Draft));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("scheduled".parse::<PostStatus>().unwrap(), PostStatus::Scheduled);
        let err = "archived".parse::<PostStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid status: 'archived'");
    }

    #[test]
    fn test_is_public() {
        let mut post = Post::new(Uuid::new_v4(), Utc::now());
        assert!(post.is_public());

        post.is_deleted = true;
        assert!(!post.is_public());

        post.is_deleted = false;
        post.status = PostStatus::Draft;
        assert!(!post.is_public());
    }
}
