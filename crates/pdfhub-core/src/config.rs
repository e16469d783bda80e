// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Session-scoped presentation preferences. None of the document services
// read this — it is handed to the presentation layer explicitly, never
// stored as process-wide mutable state.

use serde::{Deserialize, Serialize};

use crate::types::CompressionTier;

/// Per-session application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Whether the dark theme is active.
    pub dark_theme: bool,
    /// Tier preselected in the compression slider.
    pub default_tier: CompressionTier,
    /// Maximum number of operation-history entries retained.
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_theme: false,
            default_tier: CompressionTier::Medium,
            history_limit: 50,
        }
    }
}
