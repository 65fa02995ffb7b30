//! OCR Types
//!
//! Types shared by the recognition engines and the OCR extraction path.

/// Default recognition language set (English + Korean)
pub const DEFAULT_OCR_LANG: &str = "eng+kor";

/// Single token from a structured recognition pass
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    /// Token text (empty for layout rows)
    pub text: String,
    /// Engine confidence for this token; non-positive values mean "no detection"
    pub confidence: f64,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    /// The structured (per-token) pass failed. Recoverable: the page keeps
    /// its text and loses its confidence.
    #[error("Recognition data unavailable: {0}")]
    RecognitionData(String),
}

/// Validate a language tag before it reaches an engine command line
///
/// Tags are alphanumeric with optional underscore/plus ("eng", "eng+kor", "chi_sim").
pub fn validate_language(lang: &str) -> Result<(), OcrError> {
    if lang.is_empty() || lang.len() > 20 {
        return Err(OcrError::InvalidLanguage(format!(
            "length must be 1-20, got {}",
            lang.len()
        )));
    }
    if let Some(c) = lang
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '+' && *c != '_')
    {
        return Err(OcrError::InvalidLanguage(format!(
            "invalid character {:?} in {:?}",
            c, lang
        )));
    }
    Ok(())
}

/// Mean of the positive token confidences, or `None` when there are none
pub fn mean_confidence(words: &[OcrWord]) -> Option<f64> {
    let positive: Vec<f64> = words
        .iter()
        .map(|w| w.confidence)
        .filter(|c| *c > 0.0)
        .collect();

    if positive.is_empty() {
        return None;
    }
    Some(positive.iter().sum::<f64>() / positive.len() as f64)
}
