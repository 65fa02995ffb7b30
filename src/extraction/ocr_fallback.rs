//! OCR extraction
//!
//! Rasterizes pages and runs both recognition passes on each one. The plain
//! text pass is required; the structured pass only feeds the page confidence
//! and its failure never stops the remaining pages.

use std::sync::Arc;

use crate::ocr::{mean_confidence, validate_language, OcrEngine, OcrError, OcrWord, DEFAULT_OCR_LANG};
use crate::pdf::{rasterize_pages, PdfDocument, DEFAULT_DPI, DEFAULT_RASTER_WORKERS};

use super::error::ExtractResult;
use super::types::ExtractionResult;

/// OCR path settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrOptions {
    /// Default recognition language set
    pub language: String,
    /// Rasterization resolution
    pub dpi: u32,
    /// Rasterization worker count
    pub workers: usize,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_OCR_LANG.to_string(),
            dpi: DEFAULT_DPI,
            workers: DEFAULT_RASTER_WORKERS,
        }
    }
}

/// OCR the first `max_pages` pages of `document`
pub async fn extract_via_ocr(
    engine: &dyn OcrEngine,
    document: Arc<Vec<u8>>,
    max_pages: usize,
    language: &str,
    options: &OcrOptions,
) -> ExtractResult<ExtractionResult> {
    validate_language(language)?;

    let dpi = options.dpi;
    let workers = options.workers;
    let images = tokio::task::spawn_blocking(move || {
        let pdf = PdfDocument::from_bytes(&document)?;
        rasterize_pages(&pdf, max_pages, dpi, workers)
    })
    .await??;

    tracing::debug!(
        pages = images.len(),
        engine = engine.name(),
        language,
        "Running OCR"
    );

    let mut pages = Vec::with_capacity(images.len());
    for image in &images {
        let text = engine.recognize_text(&image.png, language).await?;
        let data = engine.recognize_data(&image.png, language).await;
        let confidence = page_confidence(image.page, data);

        pages.push((image.page, text.trim().to_string(), confidence));
    }

    Ok(ExtractionResult::from_ocr(pages))
}

/// Mean confidence of a page, or `None` when the structured pass failed or
/// produced no positive scores
fn page_confidence(page: usize, data: Result<Vec<OcrWord>, OcrError>) -> Option<f64> {
    match data {
        Ok(words) => mean_confidence(&words),
        Err(OcrError::RecognitionData(reason)) => {
            tracing::warn!(page, %reason, "OCR confidence unavailable for page");
            None
        }
        Err(e) => {
            tracing::warn!(page, error = %e, "OCR structured pass failed for page");
            None
        }
    }
}
