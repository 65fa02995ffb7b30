//! Scoped MuPDF document access
//!
//! Holds the raw bytes and the page count of a PDF MuPDF could open. Every operation
//! opens a fresh MuPDF document and drops it when the operation returns, so
//! document handles never outlive a call and each thread gets its own
//! instance.

use mupdf::{Document, Page, TextPageOptions};

use crate::extraction::{ExtractError, ExtractResult};

const PDF_MIME: &str = "application/pdf";

/// How far into the file the `%PDF-` marker may appear
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Check for the `%PDF-` marker anywhere in the first kilobyte
///
/// Upload sniff for the HTTP layer; `PdfDocument` does not require it.
pub fn has_pdf_header(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    head.windows(5).any(|w| w == b"%PDF-")
}

/// Validated PDF bytes
#[derive(Debug, Clone, Copy)]
pub struct PdfDocument<'a> {
    data: &'a [u8],
    page_count: usize,
}

impl<'a> PdfDocument<'a> {
    /// Open `data` with MuPDF, which repairs damaged files where it can
    pub fn from_bytes(data: &'a [u8]) -> ExtractResult<Self> {
        let doc = Document::from_bytes(data, PDF_MIME)?;
        let page_count = usize::try_from(doc.page_count()?).map_err(|_| {
            ExtractError::DocumentFormat("negative page count".to_string())
        })?;

        Ok(Self { data, page_count })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Open a fresh document instance
    pub fn open(&self) -> ExtractResult<Document> {
        Document::from_bytes(self.data, PDF_MIME).map_err(Into::into)
    }

    /// Execute a closure with a document that is released afterwards
    pub fn with_doc<F, R>(&self, f: F) -> ExtractResult<R>
    where
        F: FnOnce(&Document) -> ExtractResult<R>,
    {
        let doc = self.open()?;
        f(&doc)
    }
}

/// Plain text of a page's content stream
pub fn page_text(page: &Page) -> Result<String, mupdf::Error> {
    page.to_text_page(TextPageOptions::empty())?.to_text()
}
