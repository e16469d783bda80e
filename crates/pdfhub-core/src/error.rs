// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for PDF Hub.
//
// Every variant is constructed at the point a failure is detected; nothing
// downstream inspects message text to reclassify an error. Cleanup failures
// (temp-file deletion) are deliberately absent: they are logged where they
// occur and never surfaced, so they cannot mask an operation's real outcome.

use thiserror::Error;

use crate::types::ConversionTarget;

/// Top-level error type for all PDF Hub operations.
#[derive(Debug, Error)]
pub enum PdfHubError {
    /// Caller-supplied parameters violate an operation precondition.
    /// Raised before any external library call; never leaves partial output.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("conversion to {target} failed: {detail}")]
    Conversion {
        target: ConversionTarget,
        detail: String,
    },

    #[error("split failed: {0}")]
    Split(String),

    #[error("merge failed: {0}")]
    Merge(String),

    #[error("compression failed: {0}")]
    Compress(String),

    /// The input could not be parsed as a PDF at all.
    #[error("the file could not be read as a PDF: {0}")]
    CorruptedInput(String),

    /// The input parsed but carries an /Encrypt dictionary.
    #[error("the PDF is password-protected")]
    PasswordProtected,

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PdfHubError>;
