// src/handlers/exam.rs

use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rand::seq::SliceRandom;
use validator::Validate;

use crate::{
    core::parser::parse_questions,
    error::AppError,
    models::{
        exam::{CreateExamRequest, Exam, ExamDetailResponse},
        question::{CreateQuestionRequest, Question},
    },
    state::AppState,
    utils::{extract::extract_text, jwt::Claims},
};

/// Creates an exam.
/// Admin only.
pub async fn create_exam(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    if payload.passing_marks > payload.total_marks {
        return Err(AppError::BadRequest(
            "passingMarks cannot exceed totalMarks".to_string(),
        ));
    }

    let exam = state
        .exams
        .save(Exam::new(
            payload.title,
            payload.duration,
            payload.total_marks,
            payload.passing_marks,
            &claims.sub,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(exam)))
}

/// Lists all active exams.
pub async fn list_exams(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let exams = state.exams.find(|e| e.is_active).await?;
    Ok(Json(exams))
}

/// Returns one exam with its questions materialized, in shuffled order.
pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let exam = state
        .exams
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let mut questions = state.questions.find(|q| q.exam_id == id).await?;
    questions.shuffle(&mut rand::thread_rng());

    Ok(Json(ExamDetailResponse::new(exam, questions)))
}

/// Adds one question to an exam.
/// Admin only.
pub async fn add_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    if !payload.options.contains(&payload.correct_answer) {
        return Err(AppError::BadRequest(
            "correctAnswer must be one of the options".to_string(),
        ));
    }
    let marks = payload.marks.unwrap_or(1);
    if marks < 1 {
        return Err(AppError::BadRequest("marks must be positive".to_string()));
    }

    let mut exam = state
        .exams
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let question = state
        .questions
        .save(Question::new(
            &id,
            payload.text,
            payload.options,
            payload.correct_answer,
            marks,
        ))
        .await?;

    exam.questions.push(question.id.clone());
    state.exams.save(exam).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// Bulk-imports questions from an uploaded document.
/// Admin only.
///
/// Expects a multipart 'file' field holding extracted plain text. The
/// parser drops malformed blocks silently; zero surviving candidates is
/// the reportable failure here, as 400.
pub async fn upload_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_name = None;
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Invalid multipart data".to_string()))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|_| AppError::BadRequest("Failed to read file".to_string()))?,
            );
        }
    }

    let (file_name, file_bytes) = match (file_name, file_bytes) {
        (Some(name), Some(bytes)) => (name, bytes),
        _ => return Err(AppError::BadRequest("No file uploaded".to_string())),
    };

    let text = extract_text(&file_name, &file_bytes)?;

    let parsed = parse_questions(&text);
    if parsed.is_empty() {
        return Err(AppError::BadRequest(
            "No valid questions found. Please check format.".to_string(),
        ));
    }

    let mut exam = state
        .exams
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let questions: Vec<Question> = parsed
        .into_iter()
        .map(|candidate| Question::from_parsed(candidate, &id))
        .collect();

    let questions = state.questions.save_all(questions).await?;
    exam.questions
        .extend(questions.iter().map(|q| q.id.clone()));
    state.exams.save(exam).await?;

    tracing::info!("Imported {} questions into exam {}", questions.len(), id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("Successfully added {} questions", questions.len()),
            "questions": questions,
        })),
    ))
}
