// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::{exam::Exam, question::Question, result::ExamResult, user::User};
use crate::store::JsonCollection;

/// Shared application state: one JSON collection per entity, plus config.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<JsonCollection<User>>,
    pub exams: Arc<JsonCollection<Exam>>,
    pub questions: Arc<JsonCollection<Question>>,
    pub results: Arc<JsonCollection<ExamResult>>,
    pub config: Config,
}

impl AppState {
    /// Binds the four collections under the configured data directory.
    pub fn new(config: Config) -> Self {
        let dir = config.data_dir.clone();
        Self {
            users: Arc::new(JsonCollection::new(&dir, "users")),
            exams: Arc::new(JsonCollection::new(&dir, "exams")),
            questions: Arc::new(JsonCollection::new(&dir, "questions")),
            results: Arc::new(JsonCollection::new(&dir, "results")),
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
