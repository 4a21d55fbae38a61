//! Output Sanitizer — strips model artifacts from generated resume text.
//!
//! An ordered list of small rules. Order matters: later rules assume the
//! echo-removal rules already ran. The pipeline never fails; a rule with no
//! match passes its input through.

use once_cell::sync::Lazy;
use regex::Regex;

type Rule = fn(&str) -> String;

/// Rules in application order.
const RULES: [(&str, Rule); 9] = [
    ("prompt_echo", strip_prompt_echo),
    ("jd_echo", strip_jd_echo),
    ("rules_block", strip_rules_block),
    ("trailing_note", strip_trailing_note),
    ("duplicate_titles", collapse_duplicate_titles),
    ("markdown", strip_markdown),
    ("bullets", normalize_bullets),
    ("punctuation", normalize_punctuation),
    ("blank_lines", collapse_blank_lines),
];

static PROMPT_ECHO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)CANDIDATE DATA:.*?Now write the tailored resume below:")
        .expect("prompt echo pattern is valid")
});
static JD_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)JOB DESCRIPTION DATA:.*$").expect("jd echo pattern is valid"));
static RULES_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rules\s*:").expect("rules label pattern is valid"));
static TRAILING_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)note\s*:.*$").expect("note pattern is valid"));
static DUPLICATE_EDUCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)education\s*education").expect("duplicate education pattern is valid")
});
static DUPLICATE_SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)summary\s*summary").expect("duplicate summary pattern is valid")
});
static BULLET_AFTER_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*•\s*").expect("bullet pattern is valid"));
static BULLET_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"•{2,}").expect("bullet run pattern is valid"));
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

/// Runs every rule in order over the raw model output.
pub fn sanitize(raw: &str) -> String {
    RULES
        .iter()
        .fold(raw.to_string(), |text, (_, rule)| rule(&text))
}

/// Removes an echoed `CANDIDATE DATA: ... Now write the tailored resume below:` block.
pub fn strip_prompt_echo(text: &str) -> String {
    PROMPT_ECHO.replace_all(text, "").into_owned()
}

/// Removes an echoed `JOB DESCRIPTION DATA:` marker through end of text.
pub fn strip_jd_echo(text: &str) -> String {
    JD_ECHO.replace(text, "").into_owned()
}

/// Removes each `Rules:` block up to the next line starting with an uppercase letter.
/// A block with no such line after it is left in place.
pub fn strip_rules_block(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(label) = RULES_LABEL.find_at(text, cursor) {
        let Some(end) = next_capitalized_line(text, label.end()) else {
            break;
        };
        out.push_str(&text[cursor..label.start()]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Byte offset of the first `\n` at or after `from` whose next char is uppercase.
fn next_capitalized_line(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .match_indices('\n')
        .map(|(offset, _)| from + offset)
        .find(|&nl| text[nl + 1..].chars().next().is_some_and(char::is_uppercase))
}

/// Removes a trailing `Note:` disclaimer through end of text.
pub fn strip_trailing_note(text: &str) -> String {
    TRAILING_NOTE.replace(text, "").into_owned()
}

/// `Education Education` → `Education`, `Summary Summary` → `Summary`.
pub fn collapse_duplicate_titles(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, title) in [
        (&*DUPLICATE_EDUCATION, "Education"),
        (&*DUPLICATE_SUMMARY, "Summary"),
    ] {
        // Repeat so a tripled title still ends up single.
        while pattern.is_match(&text) {
            text = pattern.replace_all(&text, title).into_owned();
        }
    }
    text
}

/// Strips markdown emphasis and heading punctuation.
pub fn strip_markdown(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '#' | '>' | '`'))
        .collect()
}

/// Line-leading bullets become exactly `\n• `; runs of bullet glyphs collapse to one.
pub fn normalize_bullets(text: &str) -> String {
    let spaced = BULLET_AFTER_NEWLINE.replace_all(text, "\n• ");
    BULLET_RUN.replace_all(&spaced, "•").into_owned()
}

/// Typographic dashes and quotes → ASCII.
pub fn normalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '–' | '—' => '-',
            '“' | '”' => '"',
            '‘' | '’' => '\'',
            other => other,
        })
        .collect()
}

/// At most one blank line between paragraphs; trimmed.
pub fn collapse_blank_lines(text: &str) -> String {
    EXCESS_NEWLINES
        .replace_all(text, "\n\n")
        .trim()
        .to_string()
}
