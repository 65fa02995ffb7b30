//! Extraction pipeline
//!
//! Runs the text layer first and escalates to OCR once when the quality gate
//! rejects the aggregate text:
//!
//! ```text
//! TextLayer ──acceptable──▶ return text-layer result
//!     │
//!  low quality
//!     ▼
//!    Ocr ──────────────────▶ return OCR result (no further gating)
//! ```
//!
//! The pipeline is immutable after construction and shared by reference
//! between concurrent requests.

use std::sync::Arc;

use tracing::Instrument;

use crate::ocr::OcrEngine;

use super::error::ExtractResult;
use super::ocr_fallback::{self, OcrOptions};
use super::quality::QualityThresholds;
use super::text_layer::extract_text_layer;
use super::types::ExtractionResult;

/// Default page cap
pub const DEFAULT_MAX_PAGES: usize = 30;

/// Pipeline settings
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Page cap used when the caller does not give one
    pub max_pages: usize,
    /// Quality gate thresholds
    pub quality: QualityThresholds,
    /// OCR path settings
    pub ocr: OcrOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            quality: QualityThresholds::default(),
            ocr: OcrOptions::default(),
        }
    }
}

/// Text-quality-gated extraction service
pub struct ExtractionPipeline {
    options: PipelineOptions,
    engine: Arc<dyn OcrEngine>,
}

impl ExtractionPipeline {
    pub fn new(options: PipelineOptions, engine: Arc<dyn OcrEngine>) -> Self {
        Self { options, engine }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn engine(&self) -> &dyn OcrEngine {
        self.engine.as_ref()
    }

    /// Extract text, falling back to OCR when the text layer is unusable
    pub async fn extract(
        &self,
        document: Arc<Vec<u8>>,
        max_pages: usize,
    ) -> ExtractResult<ExtractionResult> {
        let span = tracing::info_span!("extract", request_id = %uuid::Uuid::new_v4(), max_pages);

        async move {
            let text_layer = {
                let document = Arc::clone(&document);
                tokio::task::spawn_blocking(move || extract_text_layer(&document, max_pages))
                    .await??
            };

            if !self.options.quality.is_low_quality(&text_layer.joined_text()) {
                tracing::info!(
                    pages = text_layer.pages().len(),
                    total_chars = text_layer.total_chars(),
                    used_ocr = false,
                    "Text layer accepted"
                );
                return Ok(text_layer);
            }

            tracing::info!(
                pages = text_layer.pages().len(),
                total_chars = text_layer.total_chars(),
                "Text layer rejected by quality gate, falling back to OCR"
            );

            let result = self.run_ocr(document, max_pages, None).await?;
            tracing::info!(
                pages = result.pages().len(),
                total_chars = result.total_chars(),
                used_ocr = true,
                "OCR extraction complete"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }

    /// OCR the document directly, bypassing the quality gate
    ///
    /// `language` overrides the configured recognition language set.
    pub async fn extract_via_ocr(
        &self,
        document: Arc<Vec<u8>>,
        max_pages: usize,
        language: Option<&str>,
    ) -> ExtractResult<ExtractionResult> {
        let span = tracing::info_span!("force_ocr", request_id = %uuid::Uuid::new_v4(), max_pages);
        self.run_ocr(document, max_pages, language)
            .instrument(span)
            .await
    }

    async fn run_ocr(
        &self,
        document: Arc<Vec<u8>>,
        max_pages: usize,
        language: Option<&str>,
    ) -> ExtractResult<ExtractionResult> {
        let language = language.unwrap_or(&self.options.ocr.language);
        ocr_fallback::extract_via_ocr(
            self.engine.as_ref(),
            document,
            max_pages,
            language,
            &self.options.ocr,
        )
        .await
    }
}
