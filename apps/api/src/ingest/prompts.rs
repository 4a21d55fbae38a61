// Prompt constants for Stage 1 resume extraction.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::GenerationOptions;

/// Deterministic decoding; the output is parsed, not read.
pub const EXTRACTION_OPTIONS: GenerationOptions = GenerationOptions {
    system: JSON_ONLY_SYSTEM,
    max_tokens: 700,
    temperature: Some(0.0),
};

/// Resume extraction prompt. Replace `{resume_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are an expert ATS resume parser.
Your task is to read the following resume text and extract key information:
name, education, skills, experience, projects, location, email, and phone.

Rules:
- Respond ONLY with valid JSON.
- Fill missing fields with null or empty lists.
- Use proper capitalization.
- No explanations or notes.

Resume:
{resume_text}
"#;
