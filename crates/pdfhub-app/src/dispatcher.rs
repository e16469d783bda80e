// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation dispatcher — route requests to the document services and
// package their raw bytes into downloadable results.

use pdfhub_core::error::{PdfHubError, Result};
use pdfhub_core::types::{
    CompressionTier, OperationKind, OperationRequest, OperationResult, UploadedFile,
};
use pdfhub_document::{compress, convert, merge, split};
use tracing::info;

/// What the presentation layer should do after a dispatch.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Render the home view; no document work was requested.
    ShowHome,
    /// An operation ran to completion; offer its artifact.
    Completed(OperationResult),
}

/// Execute one operation request.
///
/// Requests are validated here before any service is invoked, so a bad
/// request never touches the uploaded bytes. Each call is independent:
/// nothing persists between dispatches except what the caller keeps in
/// its own session state.
pub fn dispatch(request: OperationRequest) -> Result<DispatchOutcome> {
    info!(operation = request.kind().key(), "dispatching operation");

    match request {
        OperationRequest::Home => Ok(DispatchOutcome::ShowHome),

        OperationRequest::Convert { file, target } => {
            let result = convert::convert(&file, target)?;
            Ok(DispatchOutcome::Completed(result))
        }

        OperationRequest::Split {
            file,
            start_page,
            end_page,
        } => {
            let bytes = split::split(&file.bytes, start_page, end_page)?;
            Ok(DispatchOutcome::Completed(OperationResult::SingleFile {
                message: format!("PDF split successfully! Pages {start_page}-{end_page}"),
                bytes,
                filename: format!("{}_pages_{start_page}-{end_page}.pdf", file.stem()),
                mime_type: "application/pdf",
                label: "Download Split PDF",
            }))
        }

        OperationRequest::Merge { files } => {
            if files.len() < 2 {
                return Err(PdfHubError::Validation(
                    "Please upload at least 2 PDF files to merge.".to_string(),
                ));
            }
            let count = files.len();
            let bytes = merge::merge(&files)?;
            Ok(DispatchOutcome::Completed(OperationResult::SingleFile {
                message: format!("{count} PDFs merged successfully!"),
                bytes,
                filename: "merged_document.pdf".to_string(),
                mime_type: "application/pdf",
                label: "Download Merged PDF",
            }))
        }

        OperationRequest::Compress { file, tier } => {
            let original_size = file.size();
            let bytes = compress::compress(&file.bytes, tier)?;
            let message = compression_message(original_size, bytes.len());
            Ok(DispatchOutcome::Completed(OperationResult::SingleFile {
                message,
                bytes,
                filename: format!("{}_compressed.pdf", file.stem()),
                mime_type: "application/pdf",
                label: "Download Compressed PDF",
            }))
        }
    }
}

/// Success message with the size delta, e.g.
/// `PDF compressed successfully! 812.4 KB -> 410.2 KB (49.5% reduction)`.
fn compression_message(original: usize, compressed: usize) -> String {
    let original_kb = original as f64 / 1024.0;
    let compressed_kb = compressed as f64 / 1024.0;
    let reduction = if original > 0 {
        (original as f64 - compressed as f64) / original as f64 * 100.0
    } else {
        0.0
    };
    format!(
        "PDF compressed successfully! {original_kb:.1} KB -> {compressed_kb:.1} KB ({reduction:.1}% reduction)"
    )
}

/// Sidebar entries: `(key, display name)` in menu order.
pub fn list_operations() -> Vec<(&'static str, &'static str)> {
    OperationKind::ALL
        .iter()
        .map(|kind| (kind.key(), kind.display_name()))
        .collect()
}

/// Compression level names in ascending-strength order.
pub fn list_compression_tiers() -> Vec<&'static str> {
    CompressionTier::ALL.iter().map(|tier| tier.name()).collect()
}

/// Page count of an upload, for the split view's range pickers.
pub fn page_count(file: &UploadedFile) -> Result<u32> {
    split::page_count(&file.bytes)
}
