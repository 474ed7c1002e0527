//! Category request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_CATEGORY_DESCRIPTION_LENGTH, MAX_CATEGORY_NAME_LENGTH};

/// Create category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = MAX_CATEGORY_NAME_LENGTH))]
    pub name: String,

    #[validate(length(max = MAX_CATEGORY_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_hidden: bool,
}

/// Update category request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = MAX_CATEGORY_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(max = MAX_CATEGORY_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub is_hidden: Option<bool>,
}
