// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfhub-document — Document processing for PDF Hub.
//
// Provides the four one-shot services (convert, split, merge, compress),
// the scoped temp-resource manager, and thin wrappers over the external
// engines (lopdf, pdfium, pdf-extract).

pub mod compress;
pub mod convert;
pub mod docx;
pub mod merge;
pub mod pdf;
pub mod render;
pub mod split;
pub mod temp;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the primary entry points so callers can use
// `pdfhub_document::split` etc. without digging through modules.
pub use pdf::reader::PdfReader;
pub use temp::TempResource;
