//! PDF access via MuPDF
//!
//! Text-layer reads and page rasterization. MuPDF repairs damaged
//! cross-reference tables on open, which gives best-effort results for
//! malformed files.

mod document;
mod raster;

pub use document::{has_pdf_header, page_text, PdfDocument};
pub use raster::{rasterize_pages, PageImage, DEFAULT_DPI, DEFAULT_RASTER_WORKERS};
