// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Convert service — turn an uploaded PDF into Word, PNG images, or plain
// text.

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageFormat};
use pdfhub_core::error::{PdfHubError, Result};
use pdfhub_core::types::{ConversionTarget, OperationResult, UploadedFile};
use tracing::{info, instrument};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::docx::docx_from_text;
use crate::pdf::PdfReader;
use crate::render::{RENDER_DPI, render_pages};
use crate::temp::TempResource;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Convert the uploaded PDF to the requested target format.
#[instrument(skip(file), fields(file = %file.name, bytes_len = file.size()))]
pub fn convert(file: &UploadedFile, target: ConversionTarget) -> Result<OperationResult> {
    // Reject unreadable input up front, before any engine sees it.
    PdfReader::from_bytes(&file.bytes)?;

    let result = match target {
        ConversionTarget::WordDocument => to_word(file),
        ConversionTarget::ImageSet => to_images(file),
        ConversionTarget::PlainText => to_text(file),
    }?;

    info!(
        file = %file.name,
        target = %target,
        output = result.filename(),
        bytes = result.bytes().len(),
        "PDF converted"
    );
    Ok(result)
}

fn conversion_error(target: ConversionTarget, err: impl std::fmt::Display) -> PdfHubError {
    PdfHubError::Conversion {
        target,
        detail: err.to_string(),
    }
}

fn to_word(file: &UploadedFile) -> Result<OperationResult> {
    let text = extract_text(file, ConversionTarget::WordDocument)?;
    let docx = docx_from_text(&text)?;

    Ok(OperationResult::SingleFile {
        message: "PDF converted to Word successfully!".to_string(),
        bytes: docx,
        filename: format!("{}.docx", file.stem()),
        mime_type: DOCX_MIME,
        label: "Download Word File",
    })
}

fn to_images(file: &UploadedFile) -> Result<OperationResult> {
    let resource = TempResource::write_and_acquire(&file.bytes, ".pdf")?;
    let pages = render_pages(resource.path(), RENDER_DPI)?;
    shape_image_result(file.stem(), &pages)
}

/// Package rendered pages: one page downloads as a bare PNG, several as a
/// zip archive of `page_{n}.png`.
fn shape_image_result(stem: &str, pages: &[DynamicImage]) -> Result<OperationResult> {
    match pages.len() {
        0 => Err(conversion_error(
            ConversionTarget::ImageSet,
            "the document has no pages to render",
        )),
        1 => Ok(OperationResult::SingleFile {
            message: "PDF converted to PNG successfully!".to_string(),
            bytes: encode_png(&pages[0])?,
            filename: format!("{stem}.png"),
            mime_type: "image/png",
            label: "Download PNG Image",
        }),
        count => Ok(OperationResult::MultipleFilesArchive {
            message: format!("PDF converted to {count} PNG images successfully!"),
            bytes: zip_pages(pages)?,
            filename: format!("{stem}_images.zip"),
            mime_type: "application/zip",
            label: "Download Images (ZIP)",
        }),
    }
}

fn to_text(file: &UploadedFile) -> Result<OperationResult> {
    let text = extract_text(file, ConversionTarget::PlainText)?;
    let bytes = text.clone().into_bytes();

    Ok(OperationResult::TextPreview {
        message: "PDF converted to text successfully!".to_string(),
        text,
        bytes,
        filename: format!("{}.txt", file.stem()),
        mime_type: "text/plain",
        label: "Download Text File",
    })
}

/// Run the text extraction engine against a scoped temp copy of the
/// upload.
fn extract_text(file: &UploadedFile, target: ConversionTarget) -> Result<String> {
    let resource = TempResource::write_and_acquire(&file.bytes, ".pdf")?;
    pdf_extract::extract_text(resource.path()).map_err(|err| conversion_error(target, err))
}

fn encode_png(page: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    page.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|err| conversion_error(ConversionTarget::ImageSet, err))?;
    Ok(buffer.into_inner())
}

/// Zip rendered pages as `page_1.png`, `page_2.png`, ... in page order.
fn zip_pages(pages: &[DynamicImage]) -> Result<Vec<u8>> {
    let error = |err: &dyn std::fmt::Display| {
        conversion_error(ConversionTarget::ImageSet, err.to_string())
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut archive = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (index, page) in pages.iter().enumerate() {
            archive
                .start_file(format!("page_{}.png", index + 1), options)
                .map_err(|err| error(&err))?;
            let png = encode_png(page)?;
            archive.write_all(&png).map_err(|err| error(&err))?;
        }
        archive.finish().map_err(|err| error(&err))?;
    }
    Ok(buffer.into_inner())
}
