use std::sync::Arc;

use crate::config::Config;
use crate::extraction::recovery::TextRecovery;
use crate::matching::summary::SummaryService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Fallback text recovery for uploads the heuristic extractors cannot read.
    /// `NoopTextRecovery` when `AI_API_URL` is unset.
    pub recovery: Arc<dyn TextRecovery>,
    pub summarizer: Arc<dyn SummaryService>,
}
