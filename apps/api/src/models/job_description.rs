use serde::{Deserialize, Serialize};

/// Structured job requirements produced by Stage 2.
///
/// Sequence fields are always present (possibly empty), and optional strings
/// are `None` rather than empty. The parser upholds both; deserialization
/// defaults missing sequences so reloaded records keep the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionRecord {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience_required: Option<String>,
    #[serde(default)]
    pub must_have_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub education_required: Option<String>,
}
