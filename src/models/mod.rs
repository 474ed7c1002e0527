//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod category;
pub mod post;
pub mod user;

pub use category::*;
pub use post::*;
pub use user::*;

/// A stored or submitted value that is not a member of its enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: '{value}'")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}
