// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::parser::ParsedQuestion;
use crate::store::Entity;

/// A multiple-choice question belonging to one exam, as stored in the
/// 'questions' collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub exam_id: String,

    /// The question text. Bulk-imported questions keep any
    /// "Question N:" prefix verbatim.
    pub text: String,

    /// Ordered options, at least two.
    pub options: Vec<String>,

    /// Must equal one element of `options` for manually created
    /// questions. Bulk-imported questions may carry an unresolved
    /// verbatim answer token instead (accepted lossy parser behavior).
    pub correct_answer: String,

    /// Positive, defaults to 1.
    pub marks: i64,

    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        exam_id: &str,
        text: String,
        options: Vec<String>,
        correct_answer: String,
        marks: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            exam_id: exam_id.to_string(),
            text,
            options,
            correct_answer,
            marks,
            created_at: Utc::now(),
        }
    }

    /// Promotes a parser candidate into a persistable question.
    pub fn from_parsed(parsed: ParsedQuestion, exam_id: &str) -> Self {
        Self::new(
            exam_id,
            parsed.text,
            parsed.options,
            parsed.correct_answer,
            parsed.marks,
        )
    }
}

impl Entity for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

/// DTO for manually adding a question to an exam.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 500))]
    pub correct_answer: String,
    /// Defaults to 1 when omitted.
    pub marks: Option<i64>,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("at_least_two_options"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(validator::ValidationError::new("option_length"));
        }
    }
    Ok(())
}
