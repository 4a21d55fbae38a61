use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::Renderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Stage 1 generator (resume field extraction).
    pub extractor: Arc<dyn TextGenerator>,
    /// Stage 3 generator (resume tailoring).
    pub tailor: Arc<dyn TextGenerator>,
    pub renderer: Arc<dyn Renderer>,
}
