//! Quizzy Server
//!
//! Turns lecture-note PDFs into text. Pages with a usable text layer are read
//! directly; scanned or garbled documents are rasterized and run through OCR.
//! The extracted text can then be turned into simple true/false quiz items.

pub mod config;
pub mod error;
pub mod extraction;
pub mod ocr;
pub mod pdf;
pub mod quiz;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use routes::app;
