//! JD Parser — rule-based extraction of structured requirements from a raw job description.
//!
//! No LLM call. Every field comes from one small rule:
//! - labeled fields (`Job Title: ...`) take the first matching line
//! - bounded sections (`Requirements:` ...) run until a blank line or the next known header
//! - education takes the first degree keyword through end of its line
//!
//! Out-of-order headers are matched greedily left to right; a `Preferred`
//! block that precedes `Requirements` swallows it. That is a known limitation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::JobDescriptionRecord;

// ────────────────────────────────────────────────────────────────────────────
// Rule tables
// ────────────────────────────────────────────────────────────────────────────

/// Labeled single-line fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabeledField {
    JobTitle,
    Location,
    Experience,
}

impl LabeledField {
    fn label(&self) -> &'static str {
        match self {
            LabeledField::JobTitle => "Job Title",
            LabeledField::Location => "Location",
            LabeledField::Experience => "Experience",
        }
    }
}

/// Multi-line list sections, in canonical JD order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JdSection {
    Responsibilities,
    Requirements,
    Preferred,
}

impl JdSection {
    const ORDER: [JdSection; 3] = [
        JdSection::Responsibilities,
        JdSection::Requirements,
        JdSection::Preferred,
    ];

    fn header(&self) -> &'static str {
        match self {
            JdSection::Responsibilities => "Responsibilities",
            JdSection::Requirements => "Requirements",
            JdSection::Preferred => "Preferred",
        }
    }

    /// Headers that close this section: every header after it in canonical order.
    fn terminators(&self) -> impl Iterator<Item = JdSection> + '_ {
        Self::ORDER.into_iter().skip_while(move |s| s != self).skip(1)
    }

    fn pattern(&self) -> String {
        let closers: String = self
            .terminators()
            .map(|s| format!("{}|", s.header()))
            .collect();
        format!(r"(?is){}\s*[:\-]?(.*?)(?:\n\n|{}$)", self.header(), closers)
    }
}

static LABELED_PATTERNS: Lazy<Vec<(LabeledField, Regex)>> = Lazy::new(|| {
    [
        LabeledField::JobTitle,
        LabeledField::Location,
        LabeledField::Experience,
    ]
    .into_iter()
    .map(|field| {
        let pattern = format!(r"(?i){}[ \t]*[:\-][ \t]*(.*)", regex::escape(field.label()));
        (field, Regex::new(&pattern).expect("labeled field pattern is valid"))
    })
    .collect()
});

static SECTION_PATTERNS: Lazy<Vec<(JdSection, Regex)>> = Lazy::new(|| {
    JdSection::ORDER
        .into_iter()
        .map(|section| {
            let pattern = section.pattern();
            (section, Regex::new(&pattern).expect("section pattern is valid"))
        })
        .collect()
});

static EDUCATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Bachelor|Master|B\.?Tech|M\.?Tech|B\.?Sc|M\.?Sc)[^\n]*")
        .expect("education pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────────────────────────────────────

/// Parses a raw job description into a `JobDescriptionRecord`. Pure and deterministic.
pub fn parse_jd(jd_text: &str) -> JobDescriptionRecord {
    let text = jd_text.replace("\r\n", "\n");

    JobDescriptionRecord {
        job_title: find_labeled(&text, LabeledField::JobTitle),
        location: find_labeled(&text, LabeledField::Location),
        experience_required: find_labeled(&text, LabeledField::Experience),
        must_have_skills: find_section_items(&text, JdSection::Requirements),
        nice_to_have_skills: find_section_items(&text, JdSection::Preferred),
        responsibilities: find_section_items(&text, JdSection::Responsibilities),
        education_required: find_education(&text),
    }
}

/// First `<Label> [:|-] <rest-of-line>` occurrence, trimmed. Empty rest-of-line is `None`.
pub fn find_labeled(text: &str, field: LabeledField) -> Option<String> {
    let (_, re) = LABELED_PATTERNS.iter().find(|(f, _)| *f == field)?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Items of a bounded section; empty when the header is absent.
pub fn find_section_items(text: &str, section: JdSection) -> Vec<String> {
    SECTION_PATTERNS
        .iter()
        .find(|(s, _)| *s == section)
        .and_then(|(_, re)| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|span| split_items(span.as_str()))
        .unwrap_or_default()
}

/// First degree keyword through end of its line.
pub fn find_education(text: &str) -> Option<String> {
    EDUCATION_PATTERN
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Splits a captured span on newlines and semicolons, stripping bullet markers.
fn split_items(span: &str) -> Vec<String> {
    span.split(['\n', ';'])
        .map(|item| item.trim_matches(|c: char| c == '•' || c == '-' || c.is_whitespace()))
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
