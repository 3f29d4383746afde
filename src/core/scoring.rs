// src/core/scoring.rs

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// One entry of a student's submission, as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    /// Absent when the client sends an entry without a selection.
    #[serde(default)]
    pub selected_option: Option<String>,
}

/// One graded entry of the stored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAnswer {
    pub question_id: String,
    /// None marks a not-attempted question.
    pub selected_option: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
}

/// The outcome of one scoring pass. Immutable once produced; there is no
/// in-place correction flow.
///
/// Invariants: `correct_answers + incorrect_answers + not_attempted ==
/// total_questions`, and `score` is the sum of marks over correct answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    pub not_attempted: i64,
    pub status: Status,
    pub student_answers: Vec<ScoredAnswer>,
}

/// Grades one submission against an exam's question set.
///
/// For each question, in order, the first submitted answer with a matching
/// id is taken. No entry means not-attempted; an exact string match with
/// the question's correct answer scores its marks; anything else is
/// incorrect. Submitted ids that reference no question are ignored.
/// Equality is byte-for-byte, no normalization.
///
/// Pure function of its inputs; never errors. The pass threshold comes
/// from the owning exam; percentage is left to the caller, which must
/// guard against a zero `total_marks` itself.
pub fn score_submission(
    questions: &[Question],
    submitted: &[SubmittedAnswer],
    passing_marks: i64,
) -> ScoreSummary {
    let mut score = 0;
    let mut correct_answers = 0;
    let mut incorrect_answers = 0;
    let mut not_attempted = 0;
    let mut student_answers = Vec::with_capacity(questions.len());

    for question in questions {
        let answer = submitted.iter().find(|a| a.question_id == question.id);

        match answer {
            Some(answer) => {
                let is_correct = answer.selected_option.as_deref()
                    == Some(question.correct_answer.as_str());
                if is_correct {
                    score += question.marks;
                    correct_answers += 1;
                } else {
                    incorrect_answers += 1;
                }
                student_answers.push(ScoredAnswer {
                    question_id: question.id.clone(),
                    selected_option: answer.selected_option.clone(),
                    is_correct,
                });
            }
            None => {
                not_attempted += 1;
                student_answers.push(ScoredAnswer {
                    question_id: question.id.clone(),
                    selected_option: None,
                    is_correct: false,
                });
            }
        }
    }

    let status = if score >= passing_marks {
        Status::Pass
    } else {
        Status::Fail
    };

    ScoreSummary {
        score,
        total_questions: questions.len() as i64,
        correct_answers,
        incorrect_answers,
        not_attempted,
        status,
        student_answers,
    }
}
