//! Text quality gate
//!
//! Heuristic that decides whether text pulled from a PDF text layer is
//! usable, or whether the document should be sent through OCR instead.
//! The checks run in a fixed order and the first failing check decides.

/// Default minimum number of characters after trimming
pub const DEFAULT_MIN_CHARS: usize = 100;

/// Default minimum fraction of tokens containing an alphabetic character
pub const DEFAULT_MIN_ALPHA_RATIO: f64 = 0.5;

/// Thresholds for the quality gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityThresholds {
    /// Trimmed text shorter than this is rejected
    pub min_chars: usize,
    /// Token alphabetic ratio below this is rejected (equal passes)
    pub min_alpha_ratio: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            min_alpha_ratio: DEFAULT_MIN_ALPHA_RATIO,
        }
    }
}

impl QualityThresholds {
    /// Returns true when `text` should be discarded in favor of OCR
    pub fn is_low_quality(&self, text: &str) -> bool {
        if text.is_empty() {
            return true;
        }

        if text.trim().chars().count() < self.min_chars {
            return true;
        }

        let mut tokens = 0usize;
        let mut alphabetic = 0usize;
        for token in text.split_whitespace() {
            tokens += 1;
            if token.chars().any(char::is_alphabetic) {
                alphabetic += 1;
            }
        }

        if tokens == 0 {
            return true;
        }

        (alphabetic as f64 / tokens as f64) < self.min_alpha_ratio
    }
}

/// Quality gate with the default thresholds
pub fn is_low_quality(text: &str) -> bool {
    QualityThresholds::default().is_low_quality(text)
}
