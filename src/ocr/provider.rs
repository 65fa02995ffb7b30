//! OCR Engines
//!
//! Defines the engine trait and implementations for different recognition
//! backends. Every engine offers two independent passes over a page image:
//! plain text, and structured per-token data used for confidence scoring.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::tsv::parse_tsv;
use super::types::{validate_language, OcrError, OcrWord};

/// OCR engine trait
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs
    fn name(&self) -> &'static str;

    /// Check if the engine can be used
    async fn is_available(&self) -> bool;

    /// Recognize the plain text of a PNG image
    async fn recognize_text(&self, image_data: &[u8], language: &str) -> Result<String, OcrError>;

    /// Run the structured pass and return per-token results
    async fn recognize_data(
        &self,
        image_data: &[u8],
        language: &str,
    ) -> Result<Vec<OcrWord>, OcrError>;
}

/// Tesseract OCR through the `tesseract` command line tool
pub struct TesseractCliEngine {
    /// Executable name or path
    binary: String,
    /// Resolution the page images were rendered at
    dpi: u32,
}

impl TesseractCliEngine {
    pub fn new(binary: &str, dpi: u32) -> Self {
        Self {
            binary: binary.to_string(),
            dpi,
        }
    }

    /// Feed the image on stdin and collect stdout
    async fn run(
        &self,
        image_data: &[u8],
        language: &str,
        config: Option<&str>,
    ) -> Result<String, OcrError> {
        validate_language(language)?;

        let mut command = Command::new(&self.binary);
        command
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .arg("--dpi")
            .arg(self.dpi.to_string())
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3");
        if let Some(config) = config {
            command.arg(config);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OcrError::EngineNotAvailable(format!("Failed to run tesseract: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image_data)
                .await
                .map_err(|e| OcrError::ProcessingError(format!("Failed to write image: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to wait for tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl OcrEngine for TesseractCliEngine {
    fn name(&self) -> &'static str {
        "tesseract-cli"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn recognize_text(&self, image_data: &[u8], language: &str) -> Result<String, OcrError> {
        self.run(image_data, language, None).await
    }

    async fn recognize_data(
        &self,
        image_data: &[u8],
        language: &str,
    ) -> Result<Vec<OcrWord>, OcrError> {
        let tsv = self
            .run(image_data, language, Some("tsv"))
            .await
            .map_err(|e| OcrError::RecognitionData(e.to_string()))?;
        parse_tsv(&tsv)
    }
}

/// Tesseract OCR through the linked libtesseract
#[cfg(feature = "ocr-tesseract")]
pub struct LibTesseractEngine {
    /// Tessdata directory (None uses the library default)
    datapath: Option<String>,
    /// Resolution the page images were rendered at
    dpi: u32,
}

#[cfg(feature = "ocr-tesseract")]
impl LibTesseractEngine {
    pub fn new(datapath: Option<&str>, dpi: u32) -> Self {
        Self {
            datapath: datapath.map(str::to_string),
            dpi,
        }
    }

    /// Load the image into a fresh recognizer on a blocking thread
    async fn with_recognizer<F, T>(
        &self,
        image_data: &[u8],
        language: &str,
        f: F,
    ) -> Result<T, OcrError>
    where
        F: FnOnce(&mut tesseract::Tesseract) -> Result<T, OcrError> + Send + 'static,
        T: Send + 'static,
    {
        validate_language(language)?;

        let image = image_data.to_vec();
        let language = language.to_string();
        let datapath = self.datapath.clone();
        let dpi = self.dpi as i32;

        tokio::task::spawn_blocking(move || {
            let mut tess = tesseract::Tesseract::new(datapath.as_deref(), Some(&language))
                .map_err(|e| OcrError::EngineNotAvailable(format!("Tesseract init: {}", e)))?
                .set_image_from_mem(&image)
                .map_err(|e| OcrError::ProcessingError(format!("Tesseract image: {}", e)))?
                .set_source_resolution(dpi)
                .recognize()
                .map_err(|e| OcrError::ProcessingError(format!("Tesseract recognize: {}", e)))?;
            f(&mut tess)
        })
        .await
        .map_err(|e| OcrError::ProcessingError(format!("Task join error: {}", e)))?
    }
}

#[cfg(feature = "ocr-tesseract")]
#[async_trait]
impl OcrEngine for LibTesseractEngine {
    fn name(&self) -> &'static str {
        "libtesseract"
    }

    async fn is_available(&self) -> bool {
        let datapath = self.datapath.clone();
        tokio::task::spawn_blocking(move || {
            tesseract::Tesseract::new(datapath.as_deref(), Some("eng")).is_ok()
        })
        .await
        .unwrap_or(false)
    }

    async fn recognize_text(&self, image_data: &[u8], language: &str) -> Result<String, OcrError> {
        self.with_recognizer(image_data, language, |tess| {
            tess.get_text()
                .map_err(|e| OcrError::ProcessingError(format!("OCR text: {}", e)))
        })
        .await
    }

    async fn recognize_data(
        &self,
        image_data: &[u8],
        language: &str,
    ) -> Result<Vec<OcrWord>, OcrError> {
        let tsv = self
            .with_recognizer(image_data, language, |tess| {
                tess.get_tsv_text(0)
                    .map_err(|e| OcrError::RecognitionData(format!("OCR data: {}", e)))
            })
            .await
            .map_err(|e| match e {
                OcrError::RecognitionData(_) => e,
                other => OcrError::RecognitionData(other.to_string()),
            })?;
        parse_tsv(&tsv)
    }
}

/// Scripted engine for testing
///
/// Pages are numbered by call order: the n-th `recognize_text` call is page n,
/// and likewise for `recognize_data`.
#[cfg(test)]
pub struct MockEngine {
    pub texts: Vec<String>,
    pub confidences: Vec<Result<Vec<f64>, String>>,
    pub available: bool,
    text_calls: std::sync::atomic::AtomicUsize,
    data_calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockEngine {
    pub fn new(texts: Vec<&str>, confidences: Vec<Result<Vec<f64>, String>>) -> Self {
        Self {
            texts: texts.into_iter().map(str::to_string).collect(),
            confidences,
            available: true,
            text_calls: Default::default(),
            data_calls: Default::default(),
        }
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl OcrEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize_text(&self, image_data: &[u8], language: &str) -> Result<String, OcrError> {
        validate_language(language)?;
        assert!(image_data.starts_with(b"\x89PNG"), "expected a PNG page image");

        let idx = self
            .text_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.texts.get(idx).cloned().unwrap_or_default())
    }

    async fn recognize_data(
        &self,
        _image_data: &[u8],
        _language: &str,
    ) -> Result<Vec<OcrWord>, OcrError> {
        let idx = self
            .data_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match self.confidences.get(idx) {
            Some(Ok(values)) => Ok(values
                .iter()
                .map(|c| OcrWord {
                    text: "token".to_string(),
                    confidence: *c,
                })
                .collect()),
            Some(Err(message)) => Err(OcrError::RecognitionData(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}
