// Stage 1: Resume Ingest
// Implements: document reading (.txt/.md/.pdf), LLM field extraction, envelope recovery.
// All LLM calls go through the TextGenerator seam in llm_client.

pub mod handlers;
pub mod prompts;
pub mod reader;
pub mod resume_parser;
