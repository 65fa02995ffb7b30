//! Text-quality-gated extraction
//!
//! Pulls text from a PDF's embedded text layer and falls back to OCR when
//! that text is missing or looks like garbage.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              ExtractionPipeline              │
//! └──────────────────────────────────────────────┘
//!          │                         │
//!          ▼                         ▼
//!   ┌──────────────┐  low    ┌──────────────────┐
//!   │  text_layer  │───────▶ │   ocr_fallback   │
//!   │   (MuPDF)    │ quality │ (raster + OCR)   │
//!   └──────────────┘         └──────────────────┘
//!          │                         │
//!          └──────────┬──────────────┘
//!                     ▼
//!            ExtractionResult / PageRecord
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use quizzy_server::extraction::{ExtractionPipeline, PipelineOptions};
//! use quizzy_server::ocr::{create_engine, OcrEngineConfig};
//!
//! let pipeline = ExtractionPipeline::new(
//!     PipelineOptions::default(),
//!     create_engine(&OcrEngineConfig::default()),
//! );
//! let result = pipeline.extract(Arc::new(pdf_bytes), 30).await?;
//! println!("{} chars, ocr={}", result.total_chars(), result.used_ocr());
//! ```

mod error;
mod ocr_fallback;
mod pipeline;
mod quality;
mod text_layer;
mod types;

pub use error::{ExtractError, ExtractResult};
pub use ocr_fallback::{extract_via_ocr, OcrOptions};
pub use pipeline::{ExtractionPipeline, PipelineOptions, DEFAULT_MAX_PAGES};
pub use quality::{
    is_low_quality, QualityThresholds, DEFAULT_MIN_ALPHA_RATIO, DEFAULT_MIN_CHARS,
};
pub use text_layer::extract_text_layer;
pub use types::{ExtractionResult, PageRecord, PageSource};
