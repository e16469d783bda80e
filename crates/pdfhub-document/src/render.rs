// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pdfium wrapper: rasterize PDF pages to in-memory images.

use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;
use pdfhub_core::error::{PdfHubError, Result};
use pdfhub_core::types::ConversionTarget;
use tracing::debug;

/// Resolution for PDF-to-image conversion.
///
/// 150 DPI keeps page text legible while staying a reasonable download
/// size; 72 DPI would be 1 point per pixel.
pub(crate) const RENDER_DPI: u32 = 150;

fn render_error(detail: impl Into<String>) -> PdfHubError {
    PdfHubError::Conversion {
        target: ConversionTarget::ImageSet,
        detail: detail.into(),
    }
}

/// Initialize pdfium, preferring the library named by
/// `PDFIUM_DYNAMIC_LIB_PATH` and falling back to the system library.
fn create_pdfium() -> Result<Pdfium> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        if !Path::new(&path).exists() {
            return Err(render_error(format!(
                "PDFIUM_DYNAMIC_LIB_PATH is set to '{path}' but the path does not exist"
            )));
        }
        let bindings =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&path))
                .map_err(|err| render_error(err.to_string()))?;
        return Ok(Pdfium::new(bindings));
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|err| render_error(err.to_string()))?;
    Ok(Pdfium::new(bindings))
}

/// Rasterize every page of the PDF at `path` to an image at the given DPI.
///
/// Pages keep their own aspect ratio: 1 point maps to `dpi / 72` pixels.
pub fn render_pages(path: &Path, dpi: u32) -> Result<Vec<DynamicImage>> {
    let pdfium = create_pdfium()?;
    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|err| render_error(err.to_string()))?;

    let mut images = Vec::with_capacity(document.pages().len() as usize);
    for page in document.pages().iter() {
        let width_px = (page.width().value * dpi as f32 / 72.0).round() as i32;
        let height_px = (page.height().value * dpi as f32 / 72.0).round() as i32;

        let config = PdfRenderConfig::new()
            .set_target_width(width_px)
            .set_target_height(height_px);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|err| render_error(err.to_string()))?;
        images.push(bitmap.as_image());
    }

    debug!(pages = images.len(), dpi, "PDF rasterized");
    Ok(images)
}
