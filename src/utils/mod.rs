//! Utility functions

pub mod text;
pub mod validation;

pub use validation::{sanitize_string, validate_password, validate_username, Page};
