//! Extraction error types

use thiserror::Error;

use crate::ocr::OcrError;

/// Fatal extraction failures. No partial result accompanies any of these.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input bytes are not a readable PDF
    #[error("Document format error: {0}")]
    DocumentFormat(String),

    /// A page could not be rasterized or encoded
    #[error("Render error: {0}")]
    Render(String),

    /// Text recognition failed
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Blocking worker panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

impl From<mupdf::Error> for ExtractError {
    fn from(err: mupdf::Error) -> Self {
        ExtractError::DocumentFormat(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ExtractError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExtractError::Task(format!("Task join error: {}", err))
    }
}
