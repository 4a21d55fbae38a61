// Stages 2 and 3: JD parsing and resume tailoring
// Implements: rule-based JD parsing, output sanitizing, section segmentation,
// keyword extraction, ATS scoring, tailoring orchestration.
// All LLM calls go through the TextGenerator seam in llm_client.

pub mod ats_scoring;
pub mod handlers;
pub mod jd_parser;
pub mod prompts;
pub mod sanitizer;
pub mod segmenter;
pub mod tailor;
