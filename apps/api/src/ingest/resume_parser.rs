//! Stage 1 — resume field extraction.
//!
//! The extraction model is asked for a JSON object but often wraps it in
//! prose or code fences. The envelope is recovered from the raw output; when
//! nothing usable is found the raw output is kept so Stage 3 still has input.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::ingest::prompts::{EXTRACTION_OPTIONS, EXTRACTION_PROMPT_TEMPLATE};
use crate::ingest::reader::{read_text, ReadError};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::CandidateRecord;

/// Resolves Stage 1 input: an existing file path is read, anything else is the resume text itself.
pub async fn load_resume_input(input: &str) -> Result<String, ReadError> {
    let trimmed = input.trim();
    let is_path = !trimmed.is_empty()
        && !trimmed.contains('\n')
        && tokio::fs::metadata(trimmed)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

    if is_path {
        info!("Reading resume from {trimmed}");
        read_text(Path::new(trimmed)).await
    } else {
        Ok(input.to_string())
    }
}

/// Runs the extraction model over `resume_text` and parses its output.
pub async fn extract_candidate(
    resume_text: &str,
    generator: &dyn TextGenerator,
) -> Result<CandidateRecord, LlmError> {
    let prompt = EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let raw = match generator.generate(&prompt, &EXTRACTION_OPTIONS).await {
        Ok(raw) => raw,
        Err(LlmError::EmptyContent) => {
            warn!("Extraction model returned no text; keeping an empty raw output");
            String::new()
        }
        Err(e) => return Err(e),
    };
    let candidate = parse_candidate_output(&raw);
    info!(
        "Extracted candidate record (name: {}, {} skills)",
        candidate.display_name().unwrap_or("unknown"),
        candidate.skills.len()
    );
    Ok(candidate)
}

/// Recovers a `CandidateRecord` from raw model output. Never fails.
///
/// Tries the first balanced `{...}` span, then the widest first-`{` to
/// last-`}` span. Falls back to a record holding only `raw_output`.
pub fn parse_candidate_output(raw: &str) -> CandidateRecord {
    let spans: Vec<&str> = [balanced_object_span(raw), widest_object_span(raw)]
        .into_iter()
        .flatten()
        .collect();

    if spans.is_empty() {
        warn!("Extraction output contains no JSON object; keeping raw output");
        return CandidateRecord::from_raw_output(raw);
    }

    for span in &spans {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(span) {
            return CandidateRecord::from_value(value);
        }
    }

    warn!("Extraction output JSON could not be parsed; keeping raw output");
    CandidateRecord::from_raw_output(raw)
}

/// First `{...}` span whose braces balance, ignoring braces inside JSON strings.
fn balanced_object_span(text: &str) -> Option<&str> {
    text.match_indices('{')
        .find_map(|(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

/// Byte length of the balanced object starting at `text[0] == '{'`, if it closes.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// First `{` through last `}`.
fn widest_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedGenerator;

    #[test]
    fn test_plain_json_output() {
        let record = parse_candidate_output(r#"{"name": "Jane Doe", "skills": ["Python"]}"#);
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.skills, vec!["Python"]);
        assert!(record.raw_output.is_none());
    }

    #[test]
    fn test_json_wrapped_in_prose_and_fences() {
        let raw = "Here is the data:\n```json\n{\"name\": \"Jane\", \"location\": \"Pune\"}\n```\nHope this helps {:}";
        let record = parse_candidate_output(raw);
        assert_eq!(record.name.as_deref(), Some("Jane"));
        assert_eq!(record.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let raw = r#"{"name": "J}ane {Doe", "projects": "uses {braces}"} trailing }"#;
        let record = parse_candidate_output(raw);
        assert_eq!(record.name.as_deref(), Some("J}ane {Doe"));
        assert_eq!(record.projects, Value::String("uses {braces}".to_string()));
    }

    #[test]
    fn test_unbalanced_prefix_falls_through_to_next_object() {
        let raw = r#"{ oops {"name": "Jane"}"#;
        assert_eq!(balanced_object_span(raw), Some(r#"{"name": "Jane"}"#));
        assert_eq!(parse_candidate_output(raw).name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_no_object_keeps_raw_output() {
        let raw = "Sorry, I cannot parse this resume.";
        let record = parse_candidate_output(raw);
        assert_eq!(record.raw_output.as_deref(), Some(raw));
        assert!(record.name.is_none());
    }

    #[test]
    fn test_unparseable_object_keeps_raw_output() {
        let raw = "{'name': 'Jane', skills: [Python]}";
        let record = parse_candidate_output(raw);
        assert_eq!(record.raw_output.as_deref(), Some(raw));
    }

    #[test]
    fn test_widest_span_bounds() {
        assert_eq!(widest_object_span("a {x} b {y} c"), Some("{x} b {y}"));
        assert_eq!(widest_object_span("} only {"), None);
    }

    #[tokio::test]
    async fn test_extract_candidate_sends_resume_text() {
        let generator = CannedGenerator::new(r#"{"name": "Jane Doe", "email": "jane@example.com"}"#);
        let record = extract_candidate("Jane Doe\njane@example.com", &generator)
            .await
            .unwrap();
        assert_eq!(record.email.as_deref(), Some("jane@example.com"));

        let prompts = generator.prompts();
        assert!(prompts[0].contains("Resume:\nJane Doe\njane@example.com"));
        assert!(!prompts[0].contains("{resume_text}"));
    }

    #[tokio::test]
    async fn test_extract_candidate_propagates_generator_error() {
        let err = extract_candidate("text", &CannedGenerator::failing())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { .. }));
    }

    #[tokio::test]
    async fn test_empty_model_reply_keeps_blank_raw_output() {
        let record = extract_candidate("Jane Doe", &CannedGenerator::empty_content())
            .await
            .unwrap();
        assert_eq!(record.raw_output.as_deref(), Some(""));
        assert!(record.name.is_none());
    }

    #[tokio::test]
    async fn test_load_resume_input_path_or_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "From file").unwrap();

        let from_file = load_resume_input(path.to_str().unwrap()).await.unwrap();
        assert_eq!(from_file, "From file");

        let raw = load_resume_input("Jane Doe\nPython developer").await.unwrap();
        assert_eq!(raw, "Jane Doe\nPython developer");
    }
}
