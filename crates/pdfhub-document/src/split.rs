// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split service — extract a contiguous 1-indexed page range into a new PDF.

use pdfhub_core::error::{PdfHubError, Result};
use tracing::{info, instrument};

use crate::pdf::PdfReader;

/// Number of pages in an uploaded PDF, for range pickers in the UI.
#[instrument(skip_all, fields(bytes_len = bytes.len()))]
pub fn page_count(bytes: &[u8]) -> Result<u32> {
    Ok(PdfReader::from_bytes(bytes)?.page_count())
}

/// Extract pages `start_page..=end_page` (1-indexed, inclusive) into a
/// standalone PDF.
///
/// The range is validated before the document is parsed where possible:
/// a zero or inverted range can never be valid regardless of the input.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn split(bytes: &[u8], start_page: u32, end_page: u32) -> Result<Vec<u8>> {
    if start_page == 0 {
        return Err(PdfHubError::Validation(
            "page numbers start at 1".to_string(),
        ));
    }
    if start_page > end_page {
        return Err(PdfHubError::Validation(format!(
            "start page {start_page} is after end page {end_page}"
        )));
    }

    let reader = PdfReader::from_bytes(bytes)?;
    let total = reader.page_count();
    if end_page > total {
        return Err(PdfHubError::Validation(format!(
            "end page {end_page} exceeds the document's {total} pages"
        )));
    }

    let mut document = reader.into_document();

    // Delete the complement in reverse so earlier deletions never shift
    // the numbering of pages still waiting to be deleted.
    let mut pages_to_delete: Vec<u32> = (1..=total)
        .filter(|page| *page < start_page || *page > end_page)
        .collect();
    pages_to_delete.reverse();
    for page in pages_to_delete {
        document.delete_pages(&[page]);
    }

    document.prune_objects();
    document.compress();

    let mut buffer = Vec::new();
    document
        .save_to(&mut buffer)
        .map_err(|err| PdfHubError::Split(format!("could not write result: {err}")))?;

    info!(
        start_page,
        end_page,
        total,
        bytes = buffer.len(),
        "PDF split"
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::build_pdf;
    use lopdf::Document;

    #[test]
    fn extracts_the_requested_range() {
        let pdf = build_pdf(10, "Report");
        let result = split(&pdf, 3, 5).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn first_page_range_keeps_only_the_first_page() {
        let pdf = build_pdf(5, "Head");
        let result = split(&pdf, 1, 1).unwrap();
        let doc = Document::load_mem(&result).unwrap();

        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let content = doc.get_page_content(pages[&1]).unwrap();
        assert!(String::from_utf8_lossy(&content).contains("Head-Page-1"));
    }

    #[test]
    fn single_page_range_yields_one_page() {
        let pdf = build_pdf(5, "Single");
        let result = split(&pdf, 2, 2).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn full_range_keeps_every_page() {
        let pdf = build_pdf(4, "Full");
        let result = split(&pdf, 1, 4).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 4);
    }

    #[test]
    fn kept_pages_carry_their_original_content() {
        let pdf = build_pdf(10, "Marker");
        let result = split(&pdf, 3, 5).unwrap();
        let doc = Document::load_mem(&result).unwrap();

        let pages = doc.get_pages();
        let first_kept = pages[&1];
        let content = doc.get_page_content(first_kept).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("Marker-Page-3"), "content was: {text}");
    }

    #[test]
    fn zero_start_page_is_rejected() {
        let pdf = build_pdf(5, "Zero");
        let err = split(&pdf, 0, 3).unwrap_err();
        assert!(matches!(err, PdfHubError::Validation(_)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let pdf = build_pdf(5, "Inverted");
        let err = split(&pdf, 4, 2).unwrap_err();
        assert!(matches!(err, PdfHubError::Validation(_)));
    }

    #[test]
    fn out_of_bounds_end_page_is_rejected() {
        let pdf = build_pdf(5, "Bounds");
        let err = split(&pdf, 2, 9).unwrap_err();
        assert!(matches!(err, PdfHubError::Validation(_)));
    }

    #[test]
    fn invalid_range_is_rejected_before_parsing() {
        // Garbage bytes, but the range check must fire first.
        let err = split(b"not a pdf", 3, 1).unwrap_err();
        assert!(matches!(err, PdfHubError::Validation(_)));
    }

    #[test]
    fn page_count_reports_total_pages() {
        let pdf = build_pdf(7, "Count");
        assert_eq!(page_count(&pdf).unwrap(), 7);
    }
}
