// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-session state: user settings plus a bounded history of completed
// operations. Uploaded bytes and produced artifacts are never stored here.

use std::path::Path;

use chrono::{DateTime, Utc};
use pdfhub_core::config::AppConfig;
use pdfhub_core::error::Result;
use pdfhub_core::types::OperationKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One completed operation, recorded for the sidebar history view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: OperationKind,
    /// Short human-readable summary, e.g. the success message.
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything a session remembers between dispatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub config: AppConfig,
    history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
        }
    }

    /// Record a completed operation, dropping the oldest entries once the
    /// configured limit is reached.
    pub fn record(&mut self, kind: OperationKind, detail: impl Into<String>) {
        self.history.push(HistoryEntry {
            kind,
            detail: detail.into(),
            timestamp: Utc::now(),
        });
        let limit = self.config.history_limit;
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }

    /// History entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// -- State file persistence --------------------------------------------------

/// Load a previously saved session, or `None` if missing or unreadable.
pub fn load_state(path: &Path) -> Option<SessionState> {
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Persist the session as pretty-printed JSON.
pub fn persist_state(path: &Path, state: &SessionState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), "session state persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_entries_in_order() {
        let mut state = SessionState::default();
        state.record(OperationKind::Split, "PDF split successfully! Pages 1-2");
        state.record(OperationKind::Merge, "2 PDFs merged successfully!");

        let entries = state.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, OperationKind::Split);
        assert_eq!(entries[1].kind, OperationKind::Merge);
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[test]
    fn history_is_capped_at_the_configured_limit() {
        let config = AppConfig {
            history_limit: 3,
            ..AppConfig::default()
        };
        let mut state = SessionState::new(config);
        for n in 0..10 {
            state.record(OperationKind::Compress, format!("run {n}"));
        }

        let entries = state.entries();
        assert_eq!(entries.len(), 3);
        // Oldest entries were dropped.
        assert_eq!(entries[0].detail, "run 7");
        assert_eq!(entries[2].detail, "run 9");
    }

    #[test]
    fn clear_history_removes_everything() {
        let mut state = SessionState::default();
        state.record(OperationKind::Convert, "done");
        state.clear_history();
        assert!(state.entries().is_empty());
    }

    #[test]
    fn state_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut state = SessionState::default();
        state.config.dark_theme = true;
        state.record(OperationKind::Split, "PDF split successfully! Pages 3-5");
        persist_state(&path, &state).unwrap();

        let loaded = load_state(&path).unwrap();
        assert!(loaded.config.dark_theme);
        assert_eq!(loaded.entries().len(), 1);
        assert_eq!(loaded.entries()[0].kind, OperationKind::Split);
    }

    #[test]
    fn missing_state_file_loads_as_none() {
        assert!(load_state(Path::new("/nonexistent/session.json")).is_none());
    }
}
