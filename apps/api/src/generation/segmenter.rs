//! Section Segmenter — splits sanitized resume text into a `SectionMap`.
//!
//! A header line holds exactly one vocabulary word (optional colon, optional
//! surrounding whitespace). Text before the first header is dropped. Zero
//! headers yields an empty map, which callers must handle.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{SectionHeader, SectionMap};

static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(CONTACT|SUMMARY|SKILLS|PROJECTS|EXPERIENCE|EDUCATION)[ \t]*:?[ \t]*\r?$",
    )
    .expect("header line pattern is valid")
});

/// Splits `text` on header lines. A repeated header keeps its last body.
pub fn segment(text: &str) -> SectionMap {
    let headers: Vec<(SectionHeader, usize, usize)> = HEADER_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            let header = SectionHeader::parse(caps.get(1)?.as_str())?;
            Some((header, line.start(), line.end()))
        })
        .collect();

    let mut sections = SectionMap::new();
    for (i, (header, _, body_start)) in headers.iter().enumerate() {
        let body_end = headers
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(text.len());
        sections.insert(*header, text[*body_start..body_end].trim());
    }
    sections
}
