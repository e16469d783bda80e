// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the presentation layer.
//
// The dispatcher forwards these verbatim for display while the full error
// detail goes to the log. Classification is by error variant, never by
// matching substrings of the underlying library's message.

use crate::error::PdfHubError;

/// A plain-English error with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Summary shown as a heading.
    pub message: String,
    /// What the user should try next (shown as body text).
    pub suggestion: String,
}

/// Convert a `PdfHubError` into something a non-technical user can act on.
pub fn humanize_error(err: &PdfHubError) -> HumanError {
    match err {
        PdfHubError::Validation(detail) => HumanError {
            message: "The request doesn't make sense as entered.".into(),
            suggestion: detail.clone(),
        },

        PdfHubError::CorruptedInput(_) => HumanError {
            message: "The PDF file appears to be corrupted.".into(),
            suggestion: "Try opening the file on your computer to check it works, or upload a different file.".into(),
        },

        PdfHubError::PasswordProtected => HumanError {
            message: "This PDF is password-protected.".into(),
            suggestion: "Remove the password in your PDF viewer first, then upload the unlocked copy.".into(),
        },

        PdfHubError::Conversion { target, .. } => HumanError {
            message: format!("Conversion to {} failed.", target),
            suggestion: "Please check your PDF file and try again.".into(),
        },

        PdfHubError::Split(_) => HumanError {
            message: "Splitting the PDF failed.".into(),
            suggestion: "The file may use features the splitter doesn't support. Try a different file.".into(),
        },

        PdfHubError::Merge(_) => HumanError {
            message: "Merging the PDFs failed.".into(),
            suggestion: "One of the files may be damaged. Try merging the files one pair at a time to find it.".into(),
        },

        PdfHubError::Compress(_) => HumanError {
            message: "Compressing the PDF failed.".into(),
            suggestion: "The file may use features the compressor doesn't support. Try a different file.".into(),
        },

        PdfHubError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while handling the file.".into(),
                suggestion: "The server could not read or write a working file. Try again.".into(),
            },
            std::io::ErrorKind::StorageFull | std::io::ErrorKind::OutOfMemory => HumanError {
                message: "The file is too large to process.".into(),
                suggestion: "Please try again with a smaller PDF file.".into(),
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, try a smaller PDF file.".into(),
            },
        },

        PdfHubError::Serialization(_) => HumanError {
            message: "Saved settings could not be read or written.".into(),
            suggestion: "Your settings may be reset to defaults. Adjust them again if needed.".into(),
        },
    }
}
