//! OCR Module
//!
//! Recognition engines used by the OCR fallback path.
//!
//! Supports multiple backends:
//! - Tesseract CLI (default, requires the `tesseract` executable)
//! - libtesseract (feature `ocr-tesseract`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quizzy_server::ocr::{create_engine, OcrEngineConfig};
//!
//! let engine = create_engine(&OcrEngineConfig::default());
//! let text = engine.recognize_text(&png_bytes, "eng+kor").await?;
//! let words = engine.recognize_data(&png_bytes, "eng+kor").await?;
//! let confidence = quizzy_server::ocr::mean_confidence(&words);
//! ```

mod provider;
mod service;
mod tsv;
mod types;

pub use provider::{OcrEngine, TesseractCliEngine};
pub use service::{create_engine, OcrEngineConfig, OcrEngineKind};
pub use tsv::parse_tsv;
pub use types::{mean_confidence, validate_language, OcrError, OcrWord, DEFAULT_OCR_LANG};

#[cfg(feature = "ocr-tesseract")]
pub use provider::LibTesseractEngine;

#[cfg(test)]
pub(crate) use provider::MockEngine;
