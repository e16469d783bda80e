// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfhub-app — operation dispatch and per-session state for PDF Hub.
//
// The presentation layer builds an `OperationRequest`, hands it to
// `dispatch`, and renders the outcome. All document work happens in
// pdfhub-document; this crate owns routing, result packaging, and the
// session's settings and history.

pub mod dispatcher;
pub mod state;

pub use dispatcher::{DispatchOutcome, dispatch};
pub use state::SessionState;
