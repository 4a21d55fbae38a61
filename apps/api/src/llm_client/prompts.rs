// Shared prompt fragments.
// Each stage that calls a model defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment that enforces plain-text resume output.
pub const PLAIN_TEXT_SYSTEM: &str = "You write plain text only. \
    Do NOT use markdown, tables, or code fences. \
    Do NOT add notes, disclaimers, or commentary after the document.";
