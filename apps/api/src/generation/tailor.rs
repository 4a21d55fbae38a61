//! Stage 3 — tailored resume generation.
//!
//! Flow: build prompt → generate → sanitize → segment → render → ATS report.
//!
//! One generation call per run. The returned `sections` is the real
//! segmentation even when it came back empty and the document was rendered
//! from the umbrella fallback.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::ats_scoring::build_ats_report;
use crate::generation::prompts::{TAILOR_OPTIONS, TAILOR_PROMPT_TEMPLATE};
use crate::generation::sanitizer::sanitize;
use crate::generation::segmenter::segment;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::{AtsReport, CandidateRecord, JobDescriptionRecord, SectionHeader, SectionMap};
use crate::render::{render_blocking, RenderError, Renderer};

const OUTPUT_FILE_PREFIX: &str = "tailored_resume_";
const FALLBACK_FILE_NAME: &str = "candidate";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(candidate_json|jd_json)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Error)]
pub enum TailorError {
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("generation returned empty text")]
    EmptyGeneration,

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<LlmError> for TailorError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::EmptyContent => TailorError::EmptyGeneration,
            other => TailorError::Generation(other.to_string()),
        }
    }
}

/// Everything Stage 3 produces for one candidate/JD pair.
#[derive(Debug, Clone, Serialize)]
pub struct TailoringOutcome {
    pub tailored_text: String,
    pub output_path: PathBuf,
    pub sections: SectionMap,
    pub report: AtsReport,
}

/// Fills the tailoring template with pretty-printed candidate and JD data.
///
/// Placeholders are filled in one pass; inserted data is never rescanned.
pub fn build_tailor_prompt(
    candidate: &CandidateRecord,
    jd: &JobDescriptionRecord,
) -> Result<String, serde_json::Error> {
    let candidate_json = serde_json::to_string_pretty(candidate)?;
    let jd_json = serde_json::to_string_pretty(jd)?;
    let prompt = PLACEHOLDER_RE.replace_all(TAILOR_PROMPT_TEMPLATE, |caps: &Captures| match &caps[1] {
        "candidate_json" => candidate_json.clone(),
        _ => jd_json.clone(),
    });
    Ok(prompt.into_owned())
}

/// `<dir>/tailored_resume_<name>.pdf`, name falling back to `candidate`.
/// Whitespace and path separators in the name become `_`.
pub fn default_output_path(dir: &Path, candidate: &CandidateRecord) -> PathBuf {
    let name: String = candidate
        .display_name()
        .unwrap_or(FALLBACK_FILE_NAME)
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    dir.join(format!("{OUTPUT_FILE_PREFIX}{name}.pdf"))
}

/// Runs Stage 3 for one candidate against one job description.
///
/// `output_path` overrides the default file under `output_dir`.
pub async fn tailor_resume(
    candidate: &CandidateRecord,
    jd: &JobDescriptionRecord,
    generator: &dyn TextGenerator,
    renderer: Arc<dyn Renderer>,
    output_dir: &Path,
    output_path: Option<PathBuf>,
) -> Result<TailoringOutcome, TailorError> {
    // Step 1: Prompt
    let prompt = build_tailor_prompt(candidate, jd)?;

    // Step 2: Generate
    info!("Generating tailored resume");
    let raw = generator.generate(&prompt, &TAILOR_OPTIONS).await?;
    if raw.trim().is_empty() {
        return Err(TailorError::EmptyGeneration);
    }

    // Step 3: Clean and split
    let tailored_text = sanitize(&raw);
    let sections = segment(&tailored_text);

    // Step 4: Render
    let output_path = output_path.unwrap_or_else(|| default_output_path(output_dir, candidate));
    let rendered = if sections.is_empty() {
        warn!("No section headers found in tailored text; rendering it as a single SUMMARY section");
        SectionMap::single(SectionHeader::Summary, tailored_text.clone())
    } else {
        sections.clone()
    };
    render_blocking(renderer, candidate.clone(), rendered, output_path.clone()).await?;
    info!("Tailored resume saved at {}", output_path.display());

    // Step 5: Score
    let report = build_ats_report(candidate, jd, &tailored_text)?;
    info!("ATS comparison: {}", report.summary_line());

    Ok(TailoringOutcome {
        tailored_text,
        output_path,
        sections,
        report,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
