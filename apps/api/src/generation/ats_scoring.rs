//! ATS Scoring — keyword coverage of a resume corpus against JD keywords.
//!
//! Keywords come from any structured record (list values kept whole, string
//! values split into letter runs). Coverage matches whole whitespace tokens
//! only, so multi-word or punctuated keywords never match. Kept that way so
//! scores stay comparable across runs.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{AtsReport, CandidateRecord, JobDescriptionRecord};

/// Number of JD keywords echoed back in the report.
const KEYWORD_PREVIEW_LIMIT: usize = 20;
/// Tokens this short or shorter are dropped.
const MIN_KEYWORD_LEN: usize = 2;

static LETTER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+").expect("letter run pattern is valid"));

// ────────────────────────────────────────────────────────────────────────────
// Keyword extraction
// ────────────────────────────────────────────────────────────────────────────

/// Flat, lowercase, deduplicated keyword set from a JSON object.
///
/// - list values: each string element as-is
/// - string values: every maximal run of letters
/// - anything else: ignored
pub fn extract_keywords(record: &Map<String, Value>) -> BTreeSet<String> {
    let mut tokens: Vec<&str> = Vec::new();
    for value in record.values() {
        match value {
            Value::Array(items) => tokens.extend(items.iter().filter_map(Value::as_str)),
            Value::String(text) => tokens.extend(LETTER_RUN.find_iter(text).map(|m| m.as_str())),
            _ => {}
        }
    }
    tokens
        .into_iter()
        .filter(|t| t.chars().count() > MIN_KEYWORD_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Keyword set of any serializable record. Non-object records have no keywords.
pub fn extract_keywords_from<T: Serialize>(record: &T) -> Result<BTreeSet<String>, serde_json::Error> {
    Ok(match serde_json::to_value(record)? {
        Value::Object(map) => extract_keywords(&map),
        _ => BTreeSet::new(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Coverage score
// ────────────────────────────────────────────────────────────────────────────

/// Percentage of distinct non-blank keywords present as whitespace tokens in `corpus`.
/// 0.0 when there are no keywords.
pub fn ats_score<I, S>(corpus: &str, keywords: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let targets: BTreeSet<String> = keywords
        .into_iter()
        .filter(|k| !k.as_ref().trim().is_empty())
        .map(|k| k.as_ref().to_lowercase())
        .collect();

    if targets.is_empty() {
        return 0.0;
    }

    let corpus = corpus.to_lowercase();
    let words: HashSet<&str> = corpus.split_whitespace().collect();
    let matched = targets.iter().filter(|k| words.contains(k.as_str())).count();

    round2(matched as f64 / targets.len() as f64 * 100.0)
}

/// Scores the candidate's original material and the tailored text against the JD.
pub fn build_ats_report(
    candidate: &CandidateRecord,
    jd: &JobDescriptionRecord,
    tailored_text: &str,
) -> Result<AtsReport, serde_json::Error> {
    let jd_keywords = extract_keywords_from(jd)?;

    let original_score = ats_score(&candidate.original_corpus(), &jd_keywords);
    let tailored_score = ats_score(tailored_text, &jd_keywords);

    Ok(AtsReport {
        original_score,
        tailored_score,
        improvement: round2(tailored_score - original_score),
        jd_keywords: jd_keywords
            .into_iter()
            .take(KEYWORD_PREVIEW_LIMIT)
            .collect(),
    })
}

/// Two decimals, ties to even (1/32 → 3.12).
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
