//! Axum route handlers for the Resume Ingest API.

use std::path::PathBuf;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::ingest::reader::read_text_from_bytes;
use crate::models::CandidateRecord;
use crate::pipeline::run_extraction;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields accepted by the multipart resume endpoints.
#[derive(Debug, Default)]
pub struct ResumeForm {
    /// Uploaded document: original file name and contents.
    pub file: Option<(String, Bytes)>,
    pub resume_text: Option<String>,
    pub jd_text: Option<String>,
}

impl ResumeForm {
    /// Reads every recognized field; unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                    debug!("Received upload '{file_name}' ({} bytes)", bytes.len());
                    form.file = Some((file_name, bytes));
                }
                "resume_text" | "jd_text" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;
                    if name == "resume_text" {
                        form.resume_text = Some(text);
                    } else {
                        form.jd_text = Some(text);
                    }
                }
                other => debug!("Ignoring multipart field '{other}'"),
            }
        }
        Ok(form)
    }

    /// Resume text from the uploaded file, else from `resume_text`.
    pub async fn resume_text(&mut self) -> Result<String, AppError> {
        if let Some((file_name, bytes)) = self.file.take() {
            return Ok(read_text_from_bytes(&file_name, bytes).await?);
        }
        self.resume_text.take().ok_or_else(|| {
            AppError::Validation("Provide a resume 'file' or a 'resume_text' field".to_string())
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub candidate: CandidateRecord,
    pub candidate_json_path: PathBuf,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut form = ResumeForm::from_multipart(multipart).await?;
    let resume_text = form.resume_text().await?;
    let (candidate, candidate_json_path) = run_extraction(&state, &resume_text).await?;
    Ok(Json(ExtractResponse {
        candidate,
        candidate_json_path,
    }))
}
