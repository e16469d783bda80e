// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the PDF Hub toolbox.

use serde::{Deserialize, Serialize};

/// A file received from the presentation layer.
///
/// Immutable once constructed: the byte buffer is read by exactly one
/// service invocation and discarded when the request completes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as supplied by the uploader.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Filename with a trailing `.pdf` extension stripped (case-insensitive).
    ///
    /// Used to derive download names such as `report_pages_3-5.pdf` from
    /// `report.pdf`.
    pub fn stem(&self) -> &str {
        let name = self.name.as_str();
        let Some(cut) = name.len().checked_sub(4) else {
            return name;
        };
        // Names ending in multibyte characters must not be byte-sliced.
        if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".pdf") {
            &name[..cut]
        } else {
            name
        }
    }

    /// Size of the uploaded payload in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// The operations a user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Home,
    Convert,
    Split,
    Merge,
    Compress,
}

impl OperationKind {
    /// All operations in sidebar order.
    pub const ALL: [OperationKind; 5] = [
        Self::Home,
        Self::Convert,
        Self::Split,
        Self::Merge,
        Self::Compress,
    ];

    /// Stable machine key (used in history records and routing).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Convert => "convert",
            Self::Split => "split",
            Self::Merge => "merge",
            Self::Compress => "compress",
        }
    }

    /// Name shown in the operation selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Convert => "Convert PDF",
            Self::Split => "Split PDF",
            Self::Merge => "Merge PDFs",
            Self::Compress => "Compress PDF",
        }
    }

    /// Parse a machine key back into an operation.
    ///
    /// Returning `Option` keeps unknown keys a parse-boundary concern: a
    /// request for a nonexistent operation can never be constructed, so
    /// dispatch itself has no unknown-operation failure mode.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.key() == key)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Target formats for PDF conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionTarget {
    /// Word-processing document (`.docx`).
    WordDocument,
    /// One PNG per page; multi-page output is packaged as a zip archive.
    ImageSet,
    /// Plain UTF-8 text with an inline preview.
    PlainText,
}

impl ConversionTarget {
    pub const ALL: [ConversionTarget; 3] =
        [Self::WordDocument, Self::ImageSet, Self::PlainText];

    /// Name shown in the conversion-type selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WordDocument => "PDF to Word (.docx)",
            Self::ImageSet => "PDF to PNG Images",
            Self::PlainText => "PDF to Text",
        }
    }
}

impl std::fmt::Display for ConversionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Named compression aggressiveness levels.
///
/// Invariant: a higher tier is more aggressive — lower JPEG quality and
/// lower target DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionTier {
    Low,
    Medium,
    High,
}

impl CompressionTier {
    /// Tiers in ascending aggressiveness order.
    pub const ALL: [CompressionTier; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// JPEG re-encode quality (1-100) applied to embedded raster images.
    pub fn quality(&self) -> u8 {
        match self {
            Self::Low => 85,
            Self::Medium => 70,
            Self::High => 50,
        }
    }

    /// Target resolution for the tier, in dots per inch.
    pub fn target_dpi(&self) -> u32 {
        match self {
            Self::Low => 150,
            Self::Medium => 120,
            Self::High => 96,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl std::fmt::Display for CompressionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully-parameterised user request, one variant per operation.
///
/// The dispatcher matches this exhaustively, so adding an operation is a
/// compile-time checklist rather than a runtime lookup.
#[derive(Debug)]
pub enum OperationRequest {
    /// No service call; the presentation layer renders its own home view.
    Home,
    Convert {
        file: UploadedFile,
        target: ConversionTarget,
    },
    Split {
        file: UploadedFile,
        /// 1-indexed, inclusive.
        start_page: u32,
        /// 1-indexed, inclusive.
        end_page: u32,
    },
    Merge {
        /// Concatenated in list order. The dispatcher requires at least two.
        files: Vec<UploadedFile>,
    },
    Compress {
        file: UploadedFile,
        tier: CompressionTier,
    },
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Home => OperationKind::Home,
            Self::Convert { .. } => OperationKind::Convert,
            Self::Split { .. } => OperationKind::Split,
            Self::Merge { .. } => OperationKind::Merge,
            Self::Compress { .. } => OperationKind::Compress,
        }
    }
}

/// The outcome of a successful operation, shaped for presentation.
///
/// Exactly one variant per result; whichever variant, `bytes` is the full
/// downloadable payload and `(filename, mime_type, bytes)` form the
/// download contract.
#[derive(Debug, Clone)]
pub enum OperationResult {
    /// A single downloadable artifact.
    SingleFile {
        message: String,
        bytes: Vec<u8>,
        filename: String,
        mime_type: &'static str,
        label: &'static str,
    },
    /// Extracted text shown inline, with the same text offered as a download.
    TextPreview {
        message: String,
        text: String,
        bytes: Vec<u8>,
        filename: String,
        mime_type: &'static str,
        label: &'static str,
    },
    /// A zip archive of per-page outputs.
    MultipleFilesArchive {
        message: String,
        bytes: Vec<u8>,
        filename: String,
        mime_type: &'static str,
        label: &'static str,
    },
}

impl OperationResult {
    pub fn message(&self) -> &str {
        match self {
            Self::SingleFile { message, .. }
            | Self::TextPreview { message, .. }
            | Self::MultipleFilesArchive { message, .. } => message,
        }
    }

    /// The full payload to offer for download, regardless of variant.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::SingleFile { bytes, .. }
            | Self::TextPreview { bytes, .. }
            | Self::MultipleFilesArchive { bytes, .. } => bytes,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::SingleFile { filename, .. }
            | Self::TextPreview { filename, .. }
            | Self::MultipleFilesArchive { filename, .. } => filename,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::SingleFile { mime_type, .. }
            | Self::TextPreview { mime_type, .. }
            | Self::MultipleFilesArchive { mime_type, .. } => mime_type,
        }
    }

    /// Download-button label shown next to the artifact.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleFile { label, .. }
            | Self::TextPreview { label, .. }
            | Self::MultipleFilesArchive { label, .. } => label,
        }
    }
}
