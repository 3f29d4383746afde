// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scoring::{ScoreSummary, ScoredAnswer, Status, SubmittedAnswer};
use crate::store::Entity;

/// A persisted scoring outcome in the 'results' collection. Written once
/// per submission and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: String,
    pub student_id: String,
    pub exam_id: String,
    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    pub not_attempted: i64,
    pub status: Status,
    pub student_answers: Vec<ScoredAnswer>,
    pub created_at: DateTime<Utc>,
}

impl ExamResult {
    /// Attaches identity and timestamp to a scoring-engine summary.
    pub fn from_summary(summary: ScoreSummary, student_id: &str, exam_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            exam_id: exam_id.to_string(),
            score: summary.score,
            total_questions: summary.total_questions,
            correct_answers: summary.correct_answers,
            incorrect_answers: summary.incorrect_answers,
            not_attempted: summary.not_attempted,
            status: summary.status,
            student_answers: summary.student_answers,
            created_at: Utc::now(),
        }
    }
}

impl Entity for ExamResult {
    fn id(&self) -> &str {
        &self.id
    }
}

/// DTO for submitting an exam attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    pub exam_id: String,
    pub student_answers: Vec<SubmittedAnswer>,
}

/// A stored result with the exam title attached for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultWithExam {
    #[serde(flatten)]
    pub result: ExamResult,
    pub exam_title: Option<String>,
}
