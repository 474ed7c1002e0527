//! Post lifecycle: validation and derived fields.
//!
//! [`prepare_for_save`] is the single pre-persistence step for posts. It
//! checks required fields, then fills in whatever derived fields are still
//! missing. Fields that already hold a value are never recomputed, which
//! makes the step idempotent.

use chrono::{DateTime, Utc};

use crate::{
    config::PostConfig,
    constants::EXCERPT_ELLIPSIS,
    models::{Post, PostStatus},
    utils::text::{normalize_tags, strip_markup, truncate_at_word_boundary, word_count},
};

/// One or more post fields violate the schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Post validation failed: {}", describe(.problems))]
pub struct ValidationFailed {
    pub problems: Vec<FieldProblem>,
}

/// A single offending field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldProblem {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationFailed {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            problems: vec![FieldProblem {
                field,
                message: message.into(),
            }],
        }
    }

    /// Names of the offending fields, in the order they were found
    pub fn fields(&self) -> Vec<&'static str> {
        self.problems.iter().map(|p| p.field).collect()
    }
}

fn describe(problems: &[FieldProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check required fields and derive missing ones.
pub fn prepare_for_save(
    post: &mut Post,
    config: &PostConfig,
    now: DateTime<Utc>,
) -> Result<(), ValidationFailed> {
    validate(post)?;

    if post.excerpt.as_deref().is_none_or(str::is_empty) && !post.content.is_empty() {
        post.excerpt = derive_excerpt(&post.content, config.excerpt_length);
    }

    if post.reading_time_minutes.is_none() {
        post.reading_time_minutes = Some(reading_time_minutes(
            word_count(&post.content),
            config.words_per_minute,
        ));
    }

    if post.status == PostStatus::Published && post.published_at.is_none() {
        post.published_at = Some(now);
    }

    post.tags = normalize_tags(&post.tags);

    Ok(())
}

/// Required-field and range checks. Reports every problem at once.
pub fn validate(post: &Post) -> Result<(), ValidationFailed> {
    let mut problems = Vec::new();
    let mut require = |field: &'static str, value: &str| {
        if value.trim().is_empty() {
            problems.push(FieldProblem {
                field,
                message: "is required".to_string(),
            });
        }
    };

    require("title", &post.title);
    require("anime_name", &post.anime_name);
    require("content", &post.content);
    if !post.content.trim().is_empty() && strip_markup(&post.content).is_empty() {
        problems.push(FieldProblem {
            field: "content",
            message: "must contain text outside markup".to_string(),
        });
    }

    if post.category_id.is_none() {
        problems.push(FieldProblem {
            field: "category_id",
            message: "is required".to_string(),
        });
    }
    if post.reading_time_minutes.is_some_and(|minutes| minutes < 1) {
        problems.push(FieldProblem {
            field: "reading_time_minutes",
            message: "must be at least 1".to_string(),
        });
    }
    for (field, value) in [
        ("season_number", post.season_number),
        ("episode_number", post.episode_number),
    ] {
        if value.is_some_and(|n| n < 0) {
            problems.push(FieldProblem {
                field,
                message: "must not be negative".to_string(),
            });
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailed { problems })
    }
}

/// Check that a post may move from its current status to `next`
pub fn check_transition(current: PostStatus, next: PostStatus) -> Result<(), ValidationFailed> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(ValidationFailed::single(
            "status",
            format!("cannot change from {current} to {next}"),
        ))
    }
}

/// Swap in new content, dropping derived fields that were computed from the
/// old content so the next `prepare_for_save` recomputes them.
///
/// An excerpt or reading time that differs from what the old content would
/// derive was supplied by the author and is kept.
pub fn replace_content(post: &mut Post, content: String, config: &PostConfig) {
    if content == post.content {
        return;
    }

    let derived_excerpt = derive_excerpt(&post.content, config.excerpt_length);
    if post.excerpt.is_some() && post.excerpt == derived_excerpt {
        post.excerpt = None;
    }

    let derived_minutes = reading_time_minutes(word_count(&post.content), config.words_per_minute);
    if post.reading_time_minutes == Some(derived_minutes) {
        post.reading_time_minutes = None;
    }

    post.content = content;
}

/// Excerpt derived from content, `None` when the content has no text
pub fn derive_excerpt(content: &str, target_length: usize) -> Option<String> {
    let text = strip_markup(content);
    if text.is_empty() {
        return None;
    }

    let (mut excerpt, truncated) = truncate_at_word_boundary(&text, target_length);
    if truncated {
        excerpt.push_str(EXCERPT_ELLIPSIS);
    }
    Some(excerpt)
}

/// Minutes to read `words` at `words_per_minute`, rounded, never below one
pub fn reading_time_minutes(words: usize, words_per_minute: u32) -> i32 {
    let minutes = (words as f64 / f64::from(words_per_minute.max(1))).round() as i32;
    minutes.max(1)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn valid_post(status: PostStatus) -> Post {
        let mut post = Post::new(Uuid::new_v4(), Utc::now());
        post.title = "Frieren Episode 1 Review".to_string();
        post.anime_name = "Sousou no Frieren".to_string();
        post.category_id = Some(Uuid::new_v4());
        post.content = "<p>This is a long content that should be excerpted...</p>".to_string();
        post.status = status;
        post
    }

    #[test]
    fn test_reading_time_from_word_count() {
        let config = PostConfig::default();

        let mut post = valid_post(PostStatus::Draft);
        post.content = words(400);
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();
        assert_eq!(post.reading_time_minutes, Some(2));

        let mut post = valid_post(PostStatus::Draft);
        post.content = words(600);
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();
        assert_eq!(post.reading_time_minutes, Some(3));
    }

    #[test]
    fn test_reading_time_minimum_and_rounding() {
        assert_eq!(reading_time_minutes(0, 200), 1);
        assert_eq!(reading_time_minutes(50, 200), 1);
        assert_eq!(reading_time_minutes(299, 200), 1);
        assert_eq!(reading_time_minutes(300, 200), 2);
        assert_eq!(reading_time_minutes(1000, 250), 4);
    }

    #[test]
    fn test_explicit_reading_time_kept() {
        let mut post = valid_post(PostStatus::Draft);
        post.content = words(2000);
        post.reading_time_minutes = Some(3);
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        assert_eq!(post.reading_time_minutes, Some(3));
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let mut post = valid_post(PostStatus::Draft);
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();

        let excerpt = post.excerpt.unwrap();
        assert!(!excerpt.contains('<'));
        assert_eq!(excerpt, "This is a long content that should be excerpted...");
    }

    #[test]
    fn test_excerpt_truncated_with_ellipsis() {
        let mut post = valid_post(PostStatus::Draft);
        post.content = format!("<p>{}</p>", words(100));
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();

        let excerpt = post.excerpt.unwrap();
        assert!(excerpt.ends_with("..."));
        let body = excerpt.trim_end_matches("...");
        assert!(body.chars().count() <= 150);
        assert!(body.split(' ').all(|w| w == "word"));
    }

    #[test]
    fn test_excerpt_target_length_is_configurable() {
        let config = PostConfig {
            excerpt_length: 10,
            ..PostConfig::default()
        };
        let mut post = valid_post(PostStatus::Draft);
        post.content = "Spring anime season preview".to_string();
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("Spring..."));
    }

    #[test]
    fn test_explicit_excerpt_kept_and_empty_excerpt_derived() {
        let mut post = valid_post(PostStatus::Draft);
        post.excerpt = Some("Hand-written teaser".to_string());
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("Hand-written teaser"));

        let mut post = valid_post(PostStatus::Draft);
        post.excerpt = Some(String::new());
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        assert!(post.excerpt.is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn test_published_at_set_only_when_published() {
        let mut draft = valid_post(PostStatus::Draft);
        let created = draft.created_at;
        prepare_for_save(&mut draft, &PostConfig::default(), created).unwrap();
        assert!(draft.published_at.is_none());

        let mut scheduled = valid_post(PostStatus::Scheduled);
        let created = scheduled.created_at;
        prepare_for_save(&mut scheduled, &PostConfig::default(), created).unwrap();
        assert!(scheduled.published_at.is_none());

        let mut published = valid_post(PostStatus::Published);
        let created = published.created_at;
        prepare_for_save(&mut published, &PostConfig::default(), created).unwrap();
        assert_eq!(published.published_at, Some(published.created_at));
    }

    #[test]
    fn test_published_at_never_overwritten() {
        let mut post = valid_post(PostStatus::Published);
        let first = Utc::now() - Duration::days(3);
        prepare_for_save(&mut post, &PostConfig::default(), first).unwrap();

        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        assert_eq!(post.published_at, Some(first));
    }

    #[test]
    fn test_draft_then_publish_stamps_once() {
        let mut post = valid_post(PostStatus::Draft);
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        assert!(post.published_at.is_none());

        check_transition(post.status, PostStatus::Published).unwrap();
        post.status = PostStatus::Published;
        let at = Utc::now();
        prepare_for_save(&mut post, &PostConfig::default(), at).unwrap();
        assert_eq!(post.published_at, Some(at));
    }

    #[test]
    fn test_tags_normalized() {
        let mut post = valid_post(PostStatus::Draft);
        post.tags = vec!["Action".into(), " ADVENTURE ".into(), "shounen".into(), "  ".into()];
        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        assert_eq!(post.tags, vec!["action", "adventure", "shounen"]);
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let mut post = valid_post(PostStatus::Published);
        post.content = format!("<h2>Review</h2><p>{}</p>", words(450));
        post.tags = vec![" Mecha ".into(), "Drama".into()];

        prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap();
        let first = post.clone();

        prepare_for_save(&mut post, &PostConfig::default(), Utc::now() + Duration::hours(1))
            .unwrap();
        assert_eq!(post.excerpt, first.excerpt);
        assert_eq!(post.reading_time_minutes, first.reading_time_minutes);
        assert_eq!(post.published_at, first.published_at);
        assert_eq!(post.tags, first.tags);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let mut post = Post::new(Uuid::new_v4(), Utc::now());
        post.title = "   ".to_string();

        let err = prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap_err();
        assert_eq!(err.fields(), vec!["title", "anime_name", "content", "category_id"]);

        // Nothing was derived.
        assert!(post.excerpt.is_none());
        assert!(post.reading_time_minutes.is_none());
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_markup_only_content_rejected() {
        let mut post = valid_post(PostStatus::Published);
        post.content = r#"<p><img src="cover.png"></p>"#.to_string();

        let err = prepare_for_save(&mut post, &PostConfig::default(), Utc::now()).unwrap_err();
        assert_eq!(err.fields(), vec!["content"]);
        assert!(post.excerpt.is_none());
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let err = check_transition(PostStatus::Published, PostStatus::Draft).unwrap_err();
        assert_eq!(err.fields(), vec!["status"]);
        assert_eq!(
            err.to_string(),
            "Post validation failed: status: cannot change from published to draft"
        );
    }

    #[test]
    fn test_replace_content_rederives_derived_fields() {
        let config = PostConfig::default();
        let mut post = valid_post(PostStatus::Draft);
        post.content = words(400);
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();
        assert_eq!(post.reading_time_minutes, Some(2));

        replace_content(&mut post, format!("<p>Rewritten intro</p>{}", words(1000)), &config);
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();
        assert_eq!(post.reading_time_minutes, Some(5));
        assert!(post.excerpt.as_deref().unwrap().starts_with("Rewritten intro"));
    }

    #[test]
    fn test_replace_content_keeps_author_values() {
        let config = PostConfig::default();
        let mut post = valid_post(PostStatus::Draft);
        post.content = words(400);
        post.excerpt = Some("A teaser I wrote myself".to_string());
        post.reading_time_minutes = Some(7);
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();

        replace_content(&mut post, words(1000), &config);
        prepare_for_save(&mut post, &config, Utc::now()).unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("A teaser I wrote myself"));
        assert_eq!(post.reading_time_minutes, Some(7));
    }

    #[test]
    fn test_markup_only_content_has_no_excerpt() {
        assert_eq!(derive_excerpt("<p></p><br/>", 150), None);
    }
}
