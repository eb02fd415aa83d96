use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::orchestrator::Orchestrator;

pub type SharedState = Arc<AppState>;

/// Process-wide state: immutable configuration plus the backend chains,
/// both built once at startup. Nothing here mutates across requests.
pub struct AppState {
    pub config: AnalyzerConfig,
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(config: AnalyzerConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config,
            orchestrator,
        }
    }
}
