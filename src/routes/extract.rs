//! Text extraction routes
//!
//! Endpoints:
//! - POST /api/parse_info - Extract text from an uploaded PDF
//!
//! The upload is a multipart form with a `file` field. Query parameters:
//! - `max_pages`: page cap (default from configuration)
//! - `force_ocr`: skip the text layer and OCR every page
//! - `lang`: OCR language set for forced OCR (e.g. `eng+kor`); only valid
//!   together with `force_ocr=true`

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::extraction::ExtractionResult;
use crate::pdf::has_pdf_header;
use crate::state::AppState;

/// Create the extract router
pub fn router(upload_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/parse_info", post(parse_info))
        .layer(DefaultBodyLimit::max(upload_max_bytes))
}

/// Query parameters for extraction
#[derive(Debug, Default, Deserialize)]
pub struct ParseQuery {
    #[serde(default)]
    pub max_pages: Option<usize>,
    #[serde(default)]
    pub force_ocr: bool,
    #[serde(default)]
    pub lang: Option<String>,
}

/// POST /api/parse_info
async fn parse_info(
    State(state): State<AppState>,
    Query(query): Query<ParseQuery>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>> {
    if query.lang.is_some() && !query.force_ocr {
        return Err(AppError::BadRequest(
            "lang requires force_ocr=true".to_string(),
        ));
    }

    let (file_name, data) = read_pdf_upload(&mut multipart).await?;
    let pipeline = state.pipeline();
    let max_pages = query.max_pages.unwrap_or(pipeline.options().max_pages);

    tracing::info!(
        file_name = %file_name,
        size = data.len(),
        max_pages,
        force_ocr = query.force_ocr,
        "Extraction requested"
    );

    let document = Arc::new(data);
    let extraction = async {
        if query.force_ocr {
            pipeline
                .extract_via_ocr(document, max_pages, query.lang.as_deref())
                .await
        } else {
            pipeline.extract(document, max_pages).await
        }
    };

    // A timed-out extraction is dropped whole; nothing partial is returned
    let result = tokio::time::timeout(state.extraction_timeout(), extraction)
        .await
        .map_err(|_| AppError::Timeout(state.config().extraction.timeout_secs))??;

    Ok(Json(result))
}

/// Pull the `file` field out of the form and check it is a PDF
async fn read_pdf_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_file_name(&file_name) {
            return Err(AppError::BadRequest("PDF only".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        if data.is_empty() {
            return Err(AppError::EmptyInput("file"));
        }
        if !has_pdf_header(&data) {
            return Err(AppError::BadRequest("PDF only".to_string()));
        }

        return Ok((file_name, data.to_vec()));
    }

    Err(AppError::EmptyInput("file"))
}

fn is_pdf_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}
