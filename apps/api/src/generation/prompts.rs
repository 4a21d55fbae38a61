// Prompt constants for Stage 3 tailoring.
// The sanitizer keys on the `CANDIDATE DATA:`, `JOB DESCRIPTION DATA:`,
// `Rules:` and closing-line markers below; keep them in sync.

use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::GenerationOptions;

/// Generation knobs for the tailoring call.
pub const TAILOR_OPTIONS: GenerationOptions = GenerationOptions {
    system: PLAIN_TEXT_SYSTEM,
    max_tokens: 900,
    temperature: Some(0.4),
};

/// Tailoring prompt template.
/// Replace: {candidate_json}, {jd_json}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer specializing in ATS-friendly formatting.
Tailor the candidate's resume for the provided job description.

Follow this section structure:
NAME
CONTACT
SUMMARY
SKILLS
PROJECTS
EXPERIENCE
EDUCATION

Rules:
- No markdown or tables.
- Use concise, bullet-style phrasing.
- Focus on measurable, impactful statements.
- Align skills and experience with the job description.

CANDIDATE DATA:
{candidate_json}

JOB DESCRIPTION DATA:
{jd_json}

Now write the tailored resume below:
"#;
