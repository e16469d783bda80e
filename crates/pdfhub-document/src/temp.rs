// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scoped temp resources for engines that need a file path instead of a
// byte buffer.

use std::path::{Path, PathBuf};

use pdfhub_core::error::{PdfHubError, Result};
use tracing::{debug, warn};

/// A uniquely-named temporary file owned by exactly one service call.
///
/// The file is removed when the guard drops, on every exit path. Removal
/// failures must stay observable without masking the operation's real
/// outcome, so the guard owns deletion itself and downgrades any failure
/// to a `warn!` instead of returning it.
#[derive(Debug)]
pub struct TempResource {
    path: PathBuf,
}

impl TempResource {
    /// Create an empty uniquely-named file with the given suffix
    /// (e.g. `".pdf"`) and return a guard owning its path.
    pub fn acquire(suffix: &str) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("pdfhub-")
            .suffix(suffix)
            .tempfile()?;
        // Disable tempfile's silent auto-delete; the guard handles removal
        // so failures reach the log.
        let (_handle, path) = file.keep().map_err(|err| PdfHubError::Io(err.error))?;
        debug!(path = %path.display(), "temp resource acquired");
        Ok(Self { path })
    }

    /// Acquire a temp file and write `bytes` into it as one scoped step.
    pub fn write_and_acquire(bytes: &[u8], suffix: &str) -> Result<Self> {
        let resource = Self::acquire(suffix)?;
        std::fs::write(&resource.path, bytes)?;
        debug!(
            path = %resource.path.display(),
            bytes = bytes.len(),
            "temp resource written"
        );
        Ok(resource)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempResource {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "temp resource released"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to remove temp resource");
            }
        }
    }
}
