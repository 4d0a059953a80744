//! Application state
//!
//! The gateway carries two dependencies: its configuration and the injected
//! upload orchestrator. Handlers extract the state via Axum's `State`.

use std::sync::Arc;

use permadrop_core::Config;
use permadrop_orchestrator::UploadOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<dyn UploadOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<dyn UploadOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }
}
