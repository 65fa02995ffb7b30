//! Extraction result types
//!
//! Both extraction paths produce the same per-page model. Results are
//! immutable once built: `total_chars` is always derived from the page texts
//! and every page carries the source of the path that built the result.

use serde::Serialize;

/// Which extraction path produced a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSource {
    /// Embedded text layer of the PDF
    TextLayer,
    /// Optical character recognition of a rasterized page
    Ocr,
}

/// Extracted text of a single page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    page: usize,
    text: String,
    source: PageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

impl PageRecord {
    fn text_layer(page: usize, text: String) -> Self {
        Self {
            page,
            text,
            source: PageSource::TextLayer,
            confidence: None,
        }
    }

    fn ocr(page: usize, text: String, confidence: Option<f64>) -> Self {
        Self {
            page,
            text,
            source: PageSource::Ocr,
            confidence,
        }
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> PageSource {
        self.source
    }

    /// Mean OCR confidence (0-100)
    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// Number of characters (Unicode scalar values) in the page text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Whole-document extraction output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pages: Vec<PageRecord>,
    total_chars: usize,
    used_ocr: bool,
}

impl ExtractionResult {
    /// Build a text-layer result from `(page, text)` pairs
    pub fn from_text_layer<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        let pages = pages
            .into_iter()
            .map(|(page, text)| PageRecord::text_layer(page, text.into()))
            .collect();
        Self::build(pages, false)
    }

    /// Build an OCR result from `(page, text, mean confidence)` triples
    pub fn from_ocr<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = (usize, S, Option<f64>)>,
        S: Into<String>,
    {
        let pages = pages
            .into_iter()
            .map(|(page, text, confidence)| PageRecord::ocr(page, text.into(), confidence))
            .collect();
        Self::build(pages, true)
    }

    fn build(mut pages: Vec<PageRecord>, used_ocr: bool) -> Self {
        pages.sort_by_key(|p| p.page);
        let total_chars = pages.iter().map(PageRecord::char_count).sum();

        Self {
            pages,
            total_chars,
            used_ocr,
        }
    }

    /// Pages in ascending page order
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn used_ocr(&self) -> bool {
        self.used_ocr
    }

    /// All page texts joined with a blank line, the form handed to
    /// the quality gate and to quiz generation
    pub fn joined_text(&self) -> String {
        self.pages
            .iter()
            .map(PageRecord::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_chars_counts_characters_not_bytes() {
        let result = ExtractionResult::from_text_layer(vec![(1, "abc"), (2, "한국어"), (3, "")]);

        assert_eq!(result.total_chars(), 6);
        assert!(!result.used_ocr());
    }

    #[test]
    fn test_pages_are_ordered() {
        let result = ExtractionResult::from_ocr(vec![(2, "second", None), (1, "first", Some(90.0))]);

        let numbers: Vec<usize> = result.pages().iter().map(PageRecord::page).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(result.joined_text(), "first\n\nsecond");
    }

    #[test]
    fn test_serialization_shape() {
        let result = ExtractionResult::from_ocr(vec![(1, "hello", Some(86.0)), (2, "", None)]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["used_ocr"], true);
        assert_eq!(json["total_chars"], 5);
        assert_eq!(json["pages"][0]["source"], "ocr");
        assert_eq!(json["pages"][0]["confidence"], 86.0);
        assert!(json["pages"][1].get("confidence").is_none());

        let text_layer = ExtractionResult::from_text_layer(vec![(1, "x")]);
        let json = serde_json::to_value(&text_layer).unwrap();
        assert_eq!(json["pages"][0]["source"], "text_layer");
    }

    #[test]
    fn test_sources_always_follow_the_path() {
        let text_layer =
            ExtractionResult::from_text_layer(vec![(1, "a".to_string()), (2, "b".to_string())]);
        assert!(!text_layer.used_ocr());
        assert!(text_layer
            .pages()
            .iter()
            .all(|p| p.source() == PageSource::TextLayer && p.confidence().is_none()));

        let ocr = ExtractionResult::from_ocr(vec![
            (1, "a".to_string(), Some(75.0)),
            (2, "b".to_string(), None),
        ]);
        assert!(ocr.used_ocr());
        assert!(ocr.pages().iter().all(|p| p.source() == PageSource::Ocr));
        assert_eq!(ocr.pages()[0].confidence(), Some(75.0));

        let empty = ExtractionResult::from_ocr(Vec::<(usize, String, Option<f64>)>::new());
        assert!(empty.used_ocr());
        assert_eq!(empty.total_chars(), 0);
    }
}
