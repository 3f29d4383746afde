// src/utils/extract.rs

use crate::error::AppError;

/// Turns an uploaded file into the plain text the question parser expects.
///
/// Document-format parsing is not done here: Word payloads are extracted
/// by an external tool, and this endpoint takes that tool's plain-text
/// output. Binary .doc/.docx uploads are rejected with a pointer to the
/// expected workflow.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".doc") || lower.ends_with(".docx") {
        return Err(AppError::BadRequest(
            "Word documents must be extracted to plain text before upload (.txt)".to_string(),
        ));
    }

    if !lower.ends_with(".txt") && !lower.ends_with(".text") {
        return Err(AppError::BadRequest(
            "Unsupported file format. Please upload extracted plain text (.txt)".to_string(),
        ));
    }

    String::from_utf8(bytes.to_vec())
        .map_err(|_| AppError::BadRequest("File is not valid UTF-8 text".to_string()))
}
