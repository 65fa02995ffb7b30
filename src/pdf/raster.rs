//! Page rasterization for OCR
//!
//! Renders pages to PNG at a fixed resolution. A small fixed number of
//! workers share the pages round-robin; each worker opens its own MuPDF
//! document. Output is always sorted by page number.

use std::io::Cursor;

use image::{DynamicImage, RgbImage};
use mupdf::{Colorspace, Document, Matrix, Pixmap};

use super::document::PdfDocument;
use crate::extraction::{ExtractError, ExtractResult};

/// Resolution used for OCR page images
pub const DEFAULT_DPI: u32 = 300;

/// Rasterization worker count
pub const DEFAULT_RASTER_WORKERS: usize = 2;

/// PDF user space unit
const POINTS_PER_INCH: f32 = 72.0;

/// Rendered page image
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 1-based page number
    pub page: usize,
    /// PNG-encoded image
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Render the first `max_pages` pages of `pdf`
pub fn rasterize_pages(
    pdf: &PdfDocument<'_>,
    max_pages: usize,
    dpi: u32,
    workers: usize,
) -> ExtractResult<Vec<PageImage>> {
    let count = pdf.page_count().min(max_pages);
    if count == 0 {
        return Ok(Vec::new());
    }

    let workers = workers.clamp(1, count);
    let scale = dpi as f32 / POINTS_PER_INCH;

    let mut images = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || -> ExtractResult<Vec<PageImage>> {
                    let doc = pdf.open()?;
                    (worker..count)
                        .step_by(workers)
                        .map(|index| render_page(&doc, index, scale))
                        .collect()
                })
            })
            .collect();

        let mut images = Vec::with_capacity(count);
        for handle in handles {
            let rendered = handle
                .join()
                .map_err(|_| ExtractError::Task("rasterization worker panicked".to_string()))??;
            images.extend(rendered);
        }
        Ok::<_, ExtractError>(images)
    })?;

    images.sort_by_key(|image| image.page);
    Ok(images)
}

fn render_page(doc: &Document, index: usize, scale: f32) -> ExtractResult<PageImage> {
    let render_err =
        |e: mupdf::Error| ExtractError::Render(format!("page {}: {}", index + 1, e));

    let page = doc.load_page(index as i32).map_err(render_err)?;
    let matrix = Matrix::new_scale(scale, scale);
    let colorspace = Colorspace::device_rgb();
    let pixmap = page
        .to_pixmap(&matrix, &colorspace, false, false)
        .map_err(render_err)?;

    let (png, width, height) = encode_png(&pixmap)?;
    Ok(PageImage {
        page: index + 1,
        png,
        width,
        height,
    })
}

fn encode_png(pixmap: &Pixmap) -> ExtractResult<(Vec<u8>, u32, u32)> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let n = (pixmap.n() as usize).max(1);
    let samples = pixmap.samples();

    let pixel_count = width as usize * height as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for px in samples.chunks_exact(n).take(pixel_count) {
        if n >= 3 {
            rgb.extend_from_slice(&px[..3]);
        } else {
            rgb.extend_from_slice(&[px[0], px[0], px[0]]);
        }
    }

    let img = RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ExtractError::Render("pixmap size mismatch".to_string()))?;

    let mut output = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| ExtractError::Render(e.to_string()))?;

    Ok((output, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{blank_pdf, text_pdf};

    #[test]
    fn test_rasterize_respects_cap_and_order() {
        let data = blank_pdf(5);
        let pdf = PdfDocument::from_bytes(&data).unwrap();

        let images = rasterize_pages(&pdf, 4, 24, 2).unwrap();
        let pages: Vec<usize> = images.iter().map(|i| i.page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
        assert!(images.iter().all(|i| i.png.starts_with(b"\x89PNG")));
    }

    #[test]
    fn test_resolution_scales_image() {
        // fixture pages are 612x792 points
        let data = text_pdf(&[&["scale check"]]);
        let pdf = PdfDocument::from_bytes(&data).unwrap();

        let images = rasterize_pages(&pdf, 1, 72, 1).unwrap();
        assert_eq!(images.len(), 1);
        assert!((images[0].width as i64 - 612).abs() <= 1);
        assert!((images[0].height as i64 - 792).abs() <= 1);

        let decoded = image::load_from_memory(&images[0].png).unwrap();
        assert_eq!(decoded.width(), images[0].width);
    }

    #[test]
    fn test_more_workers_than_pages() {
        let data = blank_pdf(1);
        let pdf = PdfDocument::from_bytes(&data).unwrap();
        let images = rasterize_pages(&pdf, 30, 24, 8).unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn test_empty_cap() {
        let data = blank_pdf(2);
        let pdf = PdfDocument::from_bytes(&data).unwrap();
        assert!(rasterize_pages(&pdf, 0, 24, 2).unwrap().is_empty());
    }
}
