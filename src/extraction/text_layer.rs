//! Text-layer extraction
//!
//! Reads the embedded text of each page. Never falls back to OCR itself;
//! that decision belongs to the pipeline.

use crate::pdf::{page_text, PdfDocument};

use super::error::ExtractResult;
use super::types::ExtractionResult;

/// Extract the trimmed text layer of the first `max_pages` pages
///
/// Pages beyond the cap are ignored. Image-only pages yield empty text.
pub fn extract_text_layer(document: &[u8], max_pages: usize) -> ExtractResult<ExtractionResult> {
    let pdf = PdfDocument::from_bytes(document)?;
    let count = pdf.page_count().min(max_pages);

    if pdf.page_count() > count {
        tracing::debug!(
            page_count = pdf.page_count(),
            max_pages,
            "Ignoring pages beyond the cap"
        );
    }

    let pages = pdf.with_doc(|doc| {
        (0..count)
            .map(|index| {
                let page = doc.load_page(index as i32)?;
                let text = page_text(&page)?;
                Ok((index + 1, text.trim().to_string()))
            })
            .collect::<ExtractResult<Vec<_>>>()
    })?;

    Ok(ExtractionResult::from_text_layer(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ExtractError, PageSource};
    use crate::testing::{blank_pdf, prose_line, text_pdf};

    #[test]
    fn test_extracts_each_page_in_order() {
        let data = text_pdf(&[&["First page text"], &["Second page text"]]);
        let result = extract_text_layer(&data, 30).unwrap();

        assert!(!result.used_ocr());
        assert_eq!(result.pages().len(), 2);
        assert_eq!(result.pages()[0].page(), 1);
        assert!(result.pages()[0].text().contains("First page text"));
        assert!(result.pages()[1].text().contains("Second page text"));
        assert!(result
            .pages()
            .iter()
            .all(|p| p.source() == PageSource::TextLayer && p.confidence().is_none()));
    }

    #[test]
    fn test_text_is_trimmed_and_counted() {
        let data = text_pdf(&[&["  padded line  "]]);
        let result = extract_text_layer(&data, 30).unwrap();

        let text = result.pages()[0].text();
        assert_eq!(text, text.trim());
        assert_eq!(result.total_chars(), text.chars().count());
    }

    #[test]
    fn test_image_only_pages_are_empty() {
        let result = extract_text_layer(&blank_pdf(3), 30).unwrap();

        assert_eq!(result.pages().len(), 3);
        assert!(result.pages().iter().all(|p| p.text().is_empty()));
        assert_eq!(result.total_chars(), 0);
    }

    #[test]
    fn test_page_cap() {
        let lines: Vec<String> = (1..=40).map(prose_line).collect();
        let pages: Vec<[&str; 1]> = lines.iter().map(|l| [l.as_str()]).collect();
        let page_refs: Vec<&[&str]> = pages.iter().map(|p| &p[..]).collect();
        let data = text_pdf(&page_refs);

        let result = extract_text_layer(&data, 30).unwrap();
        assert_eq!(result.pages().len(), 30);
        assert_eq!(result.pages().last().unwrap().page(), 30);
        assert!(result.pages()[29].text().contains("Paragraph 30 "));
    }

    #[test]
    fn test_invalid_document() {
        let result = extract_text_layer(b"<html>not a pdf</html>", 30);
        assert!(matches!(result, Err(ExtractError::DocumentFormat(_))));
    }
}
