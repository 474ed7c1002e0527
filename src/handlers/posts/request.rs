//! Post request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{
        MAX_ANIME_NAME_LENGTH, MAX_EXCERPT_LENGTH, MAX_POST_CONTENT_LENGTH, MAX_POST_TITLE_LENGTH,
        MAX_TAGS_PER_POST,
    },
    models::PostOrder,
};

/// Create post request
///
/// Required fields default to empty so that every missing field is
/// reported together by the lifecycle validation.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(max = MAX_POST_TITLE_LENGTH))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = MAX_ANIME_NAME_LENGTH))]
    pub anime_name: String,

    pub category_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(max = MAX_POST_CONTENT_LENGTH))]
    pub content: String,

    /// Derived from content when omitted
    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    pub excerpt: Option<String>,

    /// Derived from content when omitted
    #[validate(range(min = 1))]
    pub reading_time_minutes: Option<i32>,

    /// `draft`, `scheduled` or `published` (default)
    pub status: Option<String>,

    #[validate(range(min = 0))]
    pub season_number: Option<i32>,

    #[validate(range(min = 0))]
    pub episode_number: Option<i32>,

    #[validate(length(max = MAX_TAGS_PER_POST))]
    pub tags: Option<Vec<String>>,
}

/// Update post request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(max = MAX_POST_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_ANIME_NAME_LENGTH))]
    pub anime_name: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(length(max = MAX_POST_CONTENT_LENGTH))]
    pub content: Option<String>,

    /// An empty string asks for the excerpt to be derived again
    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    pub excerpt: Option<String>,

    #[validate(range(min = 1))]
    pub reading_time_minutes: Option<i32>,

    pub status: Option<String>,

    #[validate(range(min = 0))]
    pub season_number: Option<i32>,

    #[validate(range(min = 0))]
    pub episode_number: Option<i32>,

    #[validate(length(max = MAX_TAGS_PER_POST))]
    pub tags: Option<Vec<String>>,
}

/// Public post listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<Uuid>,
    /// Comma-separated; matches posts carrying any of them
    pub tags: Option<String>,
    pub anime_name: Option<String>,
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub sort: PostOrder,
}

impl ListPostsQuery {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|tags| tags.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Editor listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ManagePostsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
}
