//! OCR engine selection
//!
//! Builds the configured engine once at startup. The extraction pipeline only
//! ever sees the `OcrEngine` trait object.

use std::sync::Arc;

use super::provider::{OcrEngine, TesseractCliEngine};

/// Recognition backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OcrEngineKind {
    /// `tesseract` executable
    #[default]
    Cli,
    /// Linked libtesseract (requires the `ocr-tesseract` feature)
    Lib,
}

impl OcrEngineKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cli" | "tesseract" => Some(Self::Cli),
            "lib" | "libtesseract" => Some(Self::Lib),
            _ => None,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrEngineConfig {
    pub kind: OcrEngineKind,
    /// Executable for the CLI engine
    pub tesseract_path: String,
    /// Tessdata directory for the library engine
    pub tessdata_dir: Option<String>,
    /// Resolution page images are rendered at
    pub dpi: u32,
}

impl Default for OcrEngineConfig {
    fn default() -> Self {
        Self {
            kind: OcrEngineKind::Cli,
            tesseract_path: "tesseract".to_string(),
            tessdata_dir: None,
            dpi: crate::pdf::DEFAULT_DPI,
        }
    }
}

/// Create the configured engine
pub fn create_engine(config: &OcrEngineConfig) -> Arc<dyn OcrEngine> {
    match config.kind {
        OcrEngineKind::Cli => Arc::new(TesseractCliEngine::new(&config.tesseract_path, config.dpi)),
        #[cfg(feature = "ocr-tesseract")]
        OcrEngineKind::Lib => Arc::new(super::provider::LibTesseractEngine::new(
            config.tessdata_dir.as_deref(),
            config.dpi,
        )),
        #[cfg(not(feature = "ocr-tesseract"))]
        OcrEngineKind::Lib => {
            tracing::warn!(
                "libtesseract engine requested but the ocr-tesseract feature is disabled, using the tesseract CLI"
            );
            Arc::new(TesseractCliEngine::new(&config.tesseract_path, config.dpi))
        }
    }
}
