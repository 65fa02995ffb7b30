//! Error types for the Quizzy server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::ocr::OcrError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Required input was empty
    #[error("{0} is required")]
    EmptyInput(&'static str),

    #[error("Extraction timed out after {0} seconds")]
    Timeout(u64),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::EmptyInput(_) => (StatusCode::BAD_REQUEST, "empty_input", self.to_string()),
            AppError::Timeout(_) => {
                tracing::warn!("{}", self);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "timeout",
                    "Extraction took too long".to_string(),
                )
            }
            AppError::Extraction(e) => match e {
                ExtractError::DocumentFormat(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid_document",
                    format!("Not a readable PDF: {}", msg),
                ),
                ExtractError::Ocr(OcrError::InvalidLanguage(msg)) => (
                    StatusCode::BAD_REQUEST,
                    "invalid_language",
                    format!("Invalid OCR language: {}", msg),
                ),
                ExtractError::Ocr(OcrError::EngineNotAvailable(_)) => {
                    tracing::error!("OCR error: {}", e);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "ocr_unavailable",
                        "OCR engine is not available".to_string(),
                    )
                }
                _ => {
                    tracing::error!("Extraction error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "extraction_error",
                        "Text extraction failed".to_string(),
                    )
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
