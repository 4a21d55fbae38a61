//! Axum route handlers for the JD, tailoring and scoring API.

use std::path::{Component, Path, PathBuf};

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::generation::ats_scoring::ats_score;
use crate::generation::tailor::TailoringOutcome;
use crate::ingest::handlers::ResumeForm;
use crate::models::{CandidateRecord, JobDescriptionRecord};
use crate::pipeline::{
    load_persisted_candidate, load_persisted_jd, run_jd_parse, run_pipeline, run_tailoring,
    PipelineRun,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJdResponse {
    pub job_description: JobDescriptionRecord,
    pub jd_json_path: PathBuf,
}

/// Omitted records are reloaded from the last persisted Stage 1 / Stage 2 output.
#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    #[serde(default)]
    pub candidate: Option<Value>,
    #[serde(default)]
    pub job_description: Option<JobDescriptionRecord>,
    /// File name inside the tailored PDF directory.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub text: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AtsScoreResponse {
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jd/parse
pub async fn handle_parse_jd(
    State(state): State<AppState>,
    Json(req): Json<ParseJdRequest>,
) -> Result<Json<ParseJdResponse>, AppError> {
    let (job_description, jd_json_path) = run_jd_parse(&state, &req.jd_text).await?;
    Ok(Json(ParseJdResponse {
        job_description,
        jd_json_path,
    }))
}

/// POST /api/v1/resumes/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(req): Json<TailorRequest>,
) -> Result<Json<TailoringOutcome>, AppError> {
    let candidate = match req.candidate {
        Some(value) => CandidateRecord::from_value(value),
        None => load_persisted_candidate(&state).await?,
    };
    let jd = match req.job_description {
        Some(jd) => jd,
        None => load_persisted_jd(&state).await?,
    };
    let output_path = req
        .output_path
        .map(|p| resolve_output_path(&state.config.tailored_pdf_dir(), &p))
        .transpose()?;

    let outcome = run_tailoring(&state, &candidate, &jd, output_path).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/resumes/pipeline
pub async fn handle_pipeline(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PipelineRun>, AppError> {
    let mut form = ResumeForm::from_multipart(multipart).await?;
    let jd_text = form
        .jd_text
        .take()
        .ok_or_else(|| AppError::Validation("Missing 'jd_text' field".to_string()))?;
    let resume_text = form.resume_text().await?;

    let run = run_pipeline(&state, &resume_text, &jd_text).await?;
    Ok(Json(run))
}

/// POST /api/v1/ats/score
pub async fn handle_ats_score(Json(req): Json<AtsScoreRequest>) -> Json<AtsScoreResponse> {
    Json(AtsScoreResponse {
        score: ats_score(&req.text, &req.keywords),
    })
}

/// Keeps client-chosen output names inside `dir`: relative, no `..`, `.pdf` extension.
fn resolve_output_path(dir: &Path, requested: &Path) -> Result<PathBuf, AppError> {
    let contained = requested
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    let is_pdf = requested
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !contained || !is_pdf {
        return Err(AppError::Validation(format!(
            "output_path must be a relative .pdf path, got '{}'",
            requested.display()
        )));
    }
    Ok(dir.join(requested))
}
