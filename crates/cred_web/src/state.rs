use std::sync::Arc;

use cred_core::AnalysisModel;

/// Shared per-process state: the analysis engine, created once at startup and
/// reused by every request.
pub struct AppState {
    pub model: Arc<dyn AnalysisModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn AnalysisModel>) -> Self {
        Self { model }
    }
}
