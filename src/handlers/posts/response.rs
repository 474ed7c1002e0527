//! Post response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Post, PostStatus};

/// Full post response
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub anime_name: String,
    pub category_id: Option<Uuid>,
    pub content: String,
    pub excerpt: Option<String>,
    pub reading_time_minutes: Option<i32>,
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

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            anime_name: post.anime_name,
            category_id: post.category_id,
            content: post.content,
            excerpt: post.excerpt,
            reading_time_minutes: post.reading_time_minutes,
            status: post.status,
            published_at: post.published_at,
            is_deleted: post.is_deleted,
            views: post.views,
            likes_count: post.likes_count,
            season_number: post.season_number,
            episode_number: post.episode_number,
            tags: post.tags,
            created_by: post.created_by,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Post summary for list views (no body)
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub anime_name: String,
    pub category_id: Option<Uuid>,
    pub excerpt: Option<String>,
    pub reading_time_minutes: Option<i32>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub views: i64,
    pub likes_count: i64,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    pub tags: Vec<String>,
    pub created_by: Uuid,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            anime_name: post.anime_name,
            category_id: post.category_id,
            excerpt: post.excerpt,
            reading_time_minutes: post.reading_time_minutes,
            status: post.status,
            published_at: post.published_at,
            is_deleted: post.is_deleted,
            views: post.views,
            likes_count: post.likes_count,
            season_number: post.season_number,
            episode_number: post.episode_number,
            tags: post.tags,
            created_by: post.created_by,
        }
    }
}

/// Post list response
#[derive(Debug, Serialize)]
pub struct PostsListResponse {
    pub posts: Vec<PostSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Like response
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: Uuid,
    pub likes_count: i64,
}
