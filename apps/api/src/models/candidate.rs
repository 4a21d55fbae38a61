use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured candidate data produced by Stage 1.
///
/// The extraction model gives no schema guarantees, so records are validated
/// on read via [`CandidateRecord::from_value`]: every recognized field is
/// coerced into its declared shape and unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Value,
    #[serde(default)]
    pub experience: Value,
    #[serde(default)]
    pub projects: Value,
    /// Raw model output kept when the structured envelope could not be recovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CandidateRecord {
    /// Builds a record from any JSON value, tolerating missing, null and oddly typed fields.
    /// Non-object input yields an empty record.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        let mut record = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "name" => record.name = scalar_text(&value),
                "full_name" => record.full_name = scalar_text(&value),
                "email" => record.email = scalar_text(&value),
                "phone" => record.phone = scalar_text(&value),
                "location" => record.location = scalar_text(&value),
                "skills" => record.skills = skill_list(&value),
                "education" => record.education = value,
                "experience" => record.experience = value,
                "projects" => record.projects = value,
                "raw_output" => record.raw_output = scalar_text(&value),
                _ => {
                    record.extra.insert(key, value);
                }
            }
        }
        record
    }

    /// A record holding only the raw model output (the parse-fallback placeholder).
    pub fn from_raw_output(raw: &str) -> Self {
        Self {
            raw_output: Some(raw.to_string()),
            ..Self::default()
        }
    }

    /// Display name with the `name` → `full_name` fallback; `None` when both are blank.
    pub fn display_name(&self) -> Option<&str> {
        [self.name.as_deref(), self.full_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }

    /// One line of contact details for document headers.
    pub fn contact_line(&self) -> String {
        [&self.email, &self.phone, &self.location]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// The text the pre-tailoring ATS score is computed against:
    /// skills, projects and experience, flattened to space-separated words.
    pub fn original_corpus(&self) -> String {
        let mut parts = vec![self.skills.join(" ")];
        parts.push(flatten_text(&self.projects));
        parts.push(flatten_text(&self.experience));
        parts.join(" ")
    }
}

/// Joins every string-like leaf of a JSON value with spaces.
pub fn flatten_text(value: &Value) -> String {
    let mut out = Vec::new();
    collect_leaves(value, &mut out);
    out.join(" ")
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            if !s.trim().is_empty() {
                out.push(s.trim().to_string());
            }
        }
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_leaves(item, out)),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn skill_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split([',', ';', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => scalar_text(item),
                Value::Null => None,
                other => Some(flatten_text(other)).filter(|s| !s.is_empty()),
            })
            .collect(),
        _ => vec![],
    }
}
