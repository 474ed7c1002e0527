//! Text helpers for derived post fields

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Remove markup tags and collapse whitespace runs into single spaces
pub fn strip_markup(input: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(input, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words once markup is removed
pub fn word_count(input: &str) -> usize {
    MARKUP_TAG.replace_all(input, " ").split_whitespace().count()
}

/// Cut `text` to at most `max_chars` characters, backing up to the last
/// word boundary when the cut would land inside a word.
///
/// Returns the (right-trimmed) text and whether anything was dropped.
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> (String, bool) {
    let Some((cut, next)) = text.char_indices().nth(max_chars) else {
        return (text.to_string(), false);
    };

    let prefix = &text[..cut];
    let kept = if next.is_whitespace() {
        prefix
    } else {
        match prefix.rfind(char::is_whitespace) {
            Some(boundary) if boundary > 0 => &prefix[..boundary],
            // A single word longer than the limit gets a hard cut.
            _ => prefix,
        }
    };

    (kept.trim_end().to_string(), true)
}

/// Trim and lowercase each tag, dropping tags that end up empty
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}
