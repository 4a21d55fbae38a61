//! Stub generators and renderers shared by unit tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::llm_client::{GenerationOptions, LlmError, TextGenerator};
use crate::models::{CandidateRecord, SectionMap};
use crate::render::{RenderError, Renderer};
use crate::state::AppState;

#[derive(Default)]
enum Reply {
    Text(String),
    #[default]
    ApiError,
    EmptyContent,
}

/// Returns a fixed response (or a fixed error) and records every prompt.
#[derive(Default)]
pub struct CannedGenerator {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            reply: Reply::Text(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Behaves like a model reply with no text blocks.
    pub fn empty_content() -> Self {
        Self {
            reply: Reply::EmptyContent,
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::ApiError => Err(LlmError::Api {
                status: 500,
                message: "stub failure".to_string(),
            }),
            Reply::EmptyContent => Err(LlmError::EmptyContent),
        }
    }
}

/// Records what it was asked to render without touching the filesystem.
#[derive(Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<(SectionMap, PathBuf)>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<(SectionMap, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(
        &self,
        _candidate: &CandidateRecord,
        sections: &SectionMap,
        path: &Path,
    ) -> Result<(), RenderError> {
        self.calls
            .lock()
            .unwrap()
            .push((sections.clone(), path.to_path_buf()));
        Ok(())
    }
}

pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, _: &CandidateRecord, _: &SectionMap, _: &Path) -> Result<(), RenderError> {
        Err(RenderError::Pdf("stub failure".to_string()))
    }
}

/// State rooted at `base` with canned extraction and tailoring responses.
pub fn test_state(base: &Path, extraction: &str, tailoring: &str) -> AppState {
    AppState {
        config: Arc::new(Config::with_base_dir(base)),
        extractor: Arc::new(CannedGenerator::new(extraction)),
        tailor: Arc::new(CannedGenerator::new(tailoring)),
        renderer: Arc::new(RecordingRenderer::default()),
    }
}
