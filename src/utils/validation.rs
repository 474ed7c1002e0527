//! Input validation utilities

use validator::ValidationError;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new("username_charset").with_message(
            "Username can only contain letters, numbers, underscores, and hyphens".into(),
        ));
    }
    if !username.chars().next().is_some_and(char::is_alphabetic) {
        return Err(ValidationError::new("username_start")
            .with_message("Username must start with a letter".into()));
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength")
            .with_message("Password must contain at least one letter and one number".into()))
    }
}

/// Remove control characters and surrounding whitespace
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalized page window for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    /// Page numbers start at 1; page size is capped at `MAX_PAGE_SIZE`
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("kaori_m").is_ok());
        assert!(validate_username("kaori-2").is_ok());
        assert!(validate_username("2kaori").is_err());
        assert!(validate_username("kaori m").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("sakura2024").is_ok());
        assert!(validate_password("sakurasakura").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  Frieren\u{0007} "), "Frieren");
        assert_eq!(sanitize_string("line\nbreak"), "line\nbreak");
    }

    #[test]
    fn test_page_defaults_and_bounds() {
        let page = Page::new(None, None);
        assert_eq!(page, Page { page: 1, per_page: DEFAULT_PAGE_SIZE });
        assert_eq!(page.offset(), 0);

        let page = Page::new(Some(0), Some(10_000));
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PAGE_SIZE);

        let page = Page::new(Some(3), Some(25));
        assert_eq!(page.offset(), 50);
        assert_eq!(page.limit(), 25);
    }
}
