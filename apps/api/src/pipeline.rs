//! Pipeline — runs the three stages and persists their outputs.
//!
//! Stage 1: resume text → CandidateRecord → candidate_output.json
//! Stage 2: JD text → JobDescriptionRecord → job_description.json
//! Stage 3: both records → tailored PDF + ATS report
//!
//! Shared by the HTTP handlers and the batch CLI mode.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::jd_parser::parse_jd;
use crate::generation::tailor::{tailor_resume, TailoringOutcome};
use crate::ingest::reader::read_text;
use crate::ingest::resume_parser::{extract_candidate, load_resume_input};
use crate::models::{CandidateRecord, JobDescriptionRecord};
use crate::state::AppState;
use crate::storage::{load_candidate, load_json, save_json};

const SAMPLE_RESUME_FILE: &str = "sample_resume.txt";
const SAMPLE_JD_FILE: &str = "sample_jd.txt";

const RESUME_TEXT_EMPTY: &str = "Resume text cannot be empty";
const JD_TEXT_EMPTY: &str = "jd_text cannot be empty";

/// Outputs of one full Stage 1 → 3 run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub candidate: CandidateRecord,
    pub candidate_json_path: PathBuf,
    pub job_description: JobDescriptionRecord,
    pub jd_json_path: PathBuf,
    pub tailoring: TailoringOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

fn require_text(text: &str, message: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

/// Stage 1: extracts and persists the candidate record.
pub async fn run_extraction(
    state: &AppState,
    resume_text: &str,
) -> Result<(CandidateRecord, PathBuf), AppError> {
    require_text(resume_text, RESUME_TEXT_EMPTY)?;

    info!("Stage 1: extracting candidate data ({} chars)", resume_text.len());
    let candidate = extract_candidate(resume_text, state.extractor.as_ref()).await?;

    let path = state.config.candidate_json_path();
    save_json(&candidate, &path).await?;
    Ok((candidate, path))
}

/// Stage 2: parses and persists the job description record.
pub async fn run_jd_parse(
    state: &AppState,
    jd_text: &str,
) -> Result<(JobDescriptionRecord, PathBuf), AppError> {
    require_text(jd_text, JD_TEXT_EMPTY)?;

    info!("Stage 2: parsing job description");
    let jd = parse_jd(jd_text);
    if jd.must_have_skills.is_empty() && jd.responsibilities.is_empty() {
        warn!("Job description has no Requirements or Responsibilities section");
    }

    let path = state.config.jd_json_path();
    save_json(&jd, &path).await?;
    Ok((jd, path))
}

/// Stage 3: tailors, renders and scores.
pub async fn run_tailoring(
    state: &AppState,
    candidate: &CandidateRecord,
    jd: &JobDescriptionRecord,
    output_path: Option<PathBuf>,
) -> Result<TailoringOutcome, AppError> {
    info!("Stage 3: generating tailored resume");
    let outcome = tailor_resume(
        candidate,
        jd,
        state.tailor.as_ref(),
        state.renderer.clone(),
        &state.config.tailored_pdf_dir(),
        output_path,
    )
    .await?;
    Ok(outcome)
}

/// Reloads the last persisted Stage 1 record. Missing file is a validation error.
pub async fn load_persisted_candidate(state: &AppState) -> Result<CandidateRecord, AppError> {
    let path = state.config.candidate_json_path();
    if !tokio::fs::try_exists(&path).await? {
        return Err(AppError::Validation(
            "No candidate record supplied and none has been extracted yet".to_string(),
        ));
    }
    Ok(load_candidate(&path).await?)
}

/// Reloads the last persisted Stage 2 record. Missing file is a validation error.
pub async fn load_persisted_jd(state: &AppState) -> Result<JobDescriptionRecord, AppError> {
    let path = state.config.jd_json_path();
    if !tokio::fs::try_exists(&path).await? {
        return Err(AppError::Validation(
            "No job description supplied and none has been parsed yet".to_string(),
        ));
    }
    Ok(load_json(&path).await?)
}

/// Runs Stage 1 → 2 → 3 and stamps the run.
///
/// Both inputs are checked before Stage 1 so a rejected run persists nothing.
pub async fn run_pipeline(
    state: &AppState,
    resume_text: &str,
    jd_text: &str,
) -> Result<PipelineRun, AppError> {
    require_text(resume_text, RESUME_TEXT_EMPTY)?;
    require_text(jd_text, JD_TEXT_EMPTY)?;

    let run_id = Uuid::new_v4();
    info!("Pipeline run {run_id} started");

    let (candidate, candidate_json_path) = run_extraction(state, resume_text).await?;
    let (job_description, jd_json_path) = run_jd_parse(state, jd_text).await?;
    let tailoring = run_tailoring(state, &candidate, &job_description, None).await?;

    info!("Pipeline run {run_id} completed");
    Ok(PipelineRun {
        run_id,
        completed_at: Utc::now(),
        candidate,
        candidate_json_path,
        job_description,
        jd_json_path,
        tailoring,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Batch mode
// ────────────────────────────────────────────────────────────────────────────

/// Runs the pipeline once over the sample files in `input_dir`.
///
/// Missing sample files are reported and the run ends without error.
pub async fn run_cli(state: &AppState) -> anyhow::Result<Option<PipelineRun>> {
    let resume_path = state.config.input_dir.join(SAMPLE_RESUME_FILE);
    let jd_path = state.config.input_dir.join(SAMPLE_JD_FILE);

    for path in [&resume_path, &jd_path] {
        if !tokio::fs::try_exists(path).await? {
            warn!(
                "Missing sample file {}. Add '{SAMPLE_RESUME_FILE}' and '{SAMPLE_JD_FILE}' to {}",
                path.display(),
                state.config.input_dir.display()
            );
            return Ok(None);
        }
    }

    let resume_text = load_resume_input(&resume_path.to_string_lossy()).await?;
    let jd_text = read_text(&jd_path).await?;

    let run = run_pipeline(state, &resume_text, &jd_text)
        .await
        .map_err(|e| anyhow::anyhow!("Pipeline failed: {e}"))?;

    info!("Candidate JSON: {}", run.candidate_json_path.display());
    info!("Job Description JSON: {}", run.jd_json_path.display());
    info!("Tailored Resume PDF: {}", run.tailoring.output_path.display());
    info!("ATS Comparison: {}", run.tailoring.report.summary_line());
    Ok(Some(run))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
