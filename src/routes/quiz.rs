//! Quiz routes
//!
//! Endpoints:
//! - POST /api/quiz - Generate quiz items from extracted text

use axum::{routing::post, Json, Router};

use crate::error::{AppError, Result};
use crate::quiz::{generate_quiz, QuizRequest, QuizResult};
use crate::state::AppState;

/// Create the quiz router
pub fn router() -> Router<AppState> {
    Router::new().route("/quiz", post(create_quiz))
}

/// POST /api/quiz
async fn create_quiz(Json(request): Json<QuizRequest>) -> Result<Json<QuizResult>> {
    if request.text.trim().is_empty() {
        return Err(AppError::EmptyInput("text"));
    }

    let result = generate_quiz(&request.text, request.max_items);
    tracing::debug!(items = result.items.len(), "Generated quiz");

    Ok(Json(result))
}
