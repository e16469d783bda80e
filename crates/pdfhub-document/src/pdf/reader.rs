// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open uploaded byte buffers with the `lopdf` crate and
// classify unreadable inputs at the point of detection.

use lopdf::Document;
use pdfhub_core::error::{PdfHubError, Result};
use tracing::{debug, instrument};

/// An opened PDF, ready for inspection or handing to a service.
///
/// Opening is where unusable inputs are classified: a parse failure becomes
/// `CorruptedInput` and an /Encrypt dictionary becomes `PasswordProtected`,
/// so no later code has to guess from error message text.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Parse a PDF from raw bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| PdfHubError::CorruptedInput(err.to_string()))?;

        if document.trailer.get(b"Encrypt").is_ok() {
            return Err(PdfHubError::PasswordProtected);
        }

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Borrow the underlying lopdf document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the reader and take ownership of the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}
