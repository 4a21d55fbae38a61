//! Document rendering — turns a candidate and its tailored sections into a file.
//!
//! Stage 3 only sees the `Renderer` trait; the concrete PDF writer lives in `pdf`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::models::{CandidateRecord, SectionMap};

pub mod pdf;

pub use pdf::PdfRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Writes a document for `candidate` with `sections` at `path`.
///
/// Implementations create missing parent directories and overwrite an
/// existing file. Calls block; async callers go through [`render_blocking`].
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        candidate: &CandidateRecord,
        sections: &SectionMap,
        path: &Path,
    ) -> Result<(), RenderError>;
}

/// Runs `renderer` on the blocking pool so layout and file writes stay off the async workers.
pub async fn render_blocking(
    renderer: Arc<dyn Renderer>,
    candidate: CandidateRecord,
    sections: SectionMap,
    path: PathBuf,
) -> Result<(), RenderError> {
    tokio::task::spawn_blocking(move || renderer.render(&candidate, &sections, &path))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}
