use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::quiz::Difficulty;

pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Body of `POST /api/quizzes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: String,
    pub difficulty: Difficulty,
    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
    #[validate(custom(function = "validate_options"))]
    pub options: Vec<String>,
    pub correct_option_index: usize,
}

impl QuestionPayload {
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(); DEFAULT_OPTION_COUNT],
            correct_option_index: 0,
        }
    }
}

fn validate_not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn validate_options(options: &Vec<String>) -> Result<(), ValidationError> {
    if options.iter().any(|o| o.trim().is_empty()) {
        let mut err = ValidationError::new("required");
        err.message = Some("every option needs a text".into());
        return Err(err);
    }
    Ok(())
}
