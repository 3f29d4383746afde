// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;
use crate::store::Entity;

/// A named collection of questions with a time limit and pass threshold,
/// as stored in the 'exams' collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub title: String,
    /// Minutes, positive.
    pub duration: i64,
    pub total_marks: i64,
    /// 0 <= passing_marks <= total_marks.
    pub passing_marks: i64,
    /// Inactive exams are hidden from the student listing.
    pub is_active: bool,
    /// Ordered question ids.
    pub questions: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Exam {
    pub fn new(
        title: String,
        duration: i64,
        total_marks: i64,
        passing_marks: i64,
        created_by: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            duration,
            total_marks,
            passing_marks,
            is_active: true,
            questions: Vec::new(),
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Entity for Exam {
    fn id(&self) -> &str {
        &self.id
    }
}

/// DTO for creating an exam. The passing/total relation is checked in the
/// handler since it spans two fields.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 1))]
    pub duration: i64,
    #[validate(range(min = 1))]
    pub total_marks: i64,
    #[validate(range(min = 0))]
    pub passing_marks: i64,
}

/// Exam detail response: the exam with its question list materialized
/// (replacing the stored ids).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDetailResponse {
    pub id: String,
    pub title: String,
    pub duration: i64,
    pub total_marks: i64,
    pub passing_marks: i64,
    pub is_active: bool,
    pub questions: Vec<Question>,
}

impl ExamDetailResponse {
    pub fn new(exam: Exam, questions: Vec<Question>) -> Self {
        Self {
            id: exam.id,
            title: exam.title,
            duration: exam.duration,
            total_marks: exam.total_marks,
            passing_marks: exam.passing_marks,
            is_active: exam.is_active,
            questions,
        }
    }
}
