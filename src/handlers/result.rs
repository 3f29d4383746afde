// src/handlers/result.rs

use std::collections::HashMap;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    core::scoring::score_submission,
    error::AppError,
    models::result::{ExamResult, ResultWithExam, SubmitResultRequest},
    state::AppState,
    utils::jwt::Claims,
};

/// Submits an exam attempt: grades it against the exam's question set and
/// persists the result.
///
/// The scoring pass runs on the snapshot of questions loaded here; the
/// stored result is immutable once written.
pub async fn submit_result(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = state
        .exams
        .find_by_id(&payload.exam_id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let questions = state
        .questions
        .find(|q| q.exam_id == payload.exam_id)
        .await?;

    let summary = score_submission(&questions, &payload.student_answers, exam.passing_marks);

    let result = state
        .results
        .save(ExamResult::from_summary(summary, &claims.sub, &exam.id))
        .await?;

    tracing::info!(
        "Student {} scored {}/{} on exam {}",
        claims.sub,
        result.score,
        exam.total_marks,
        exam.id
    );

    Ok((StatusCode::CREATED, Json(result)))
}

/// Lists the caller's results, newest data as stored, with exam titles
/// attached for display.
pub async fn my_results(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let results = state.results.find(|r| r.student_id == claims.sub).await?;

    let titles: HashMap<String, String> = state
        .exams
        .find_all()
        .await?
        .into_iter()
        .map(|e| (e.id, e.title))
        .collect();

    let results: Vec<ResultWithExam> = results
        .into_iter()
        .map(|result| {
            let exam_title = titles.get(&result.exam_id).cloned();
            ResultWithExam { result, exam_title }
        })
        .collect();

    Ok(Json(results))
}
