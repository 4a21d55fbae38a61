//! Plain single-column PDF writer built on `lopdf`.
//!
//! Uses the base-14 Helvetica faces with WinAnsi encoding, so no font files
//! are embedded. Line breaking is a column estimate, not glyph-exact.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::{RenderError, Renderer};
use crate::models::{CandidateRecord, SectionMap};

// US letter, points.
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 54;

/// Characters per body line at 10pt across the text block.
const WRAP_COLUMNS: usize = 92;
const FALLBACK_NAME: &str = "Candidate";

// ────────────────────────────────────────────────────────────────────────────
// Line model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
}

impl Face {
    fn resource_name(&self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
        }
    }
}

/// One laid-out line: text, face, size and the vertical advance before it.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    face: Face,
    size: i64,
    advance: i64,
}

impl Line {
    fn new(text: impl Into<String>, face: Face, size: i64, advance: i64) -> Self {
        Self {
            text: text.into(),
            face,
            size,
            advance,
        }
    }
}

/// Name block, contact line, then every section in canonical order.
fn layout(candidate: &CandidateRecord, sections: &SectionMap) -> Vec<Line> {
    let mut lines = vec![Line::new(
        candidate.display_name().unwrap_or(FALLBACK_NAME),
        Face::Bold,
        18,
        18,
    )];

    let contact = candidate.contact_line();
    if !contact.is_empty() {
        lines.push(Line::new(contact, Face::Regular, 10, 14));
    }

    for (header, body) in sections.in_document_order() {
        lines.push(Line::new(header.as_str(), Face::Bold, 12, 24));
        for paragraph in body.lines() {
            if paragraph.trim().is_empty() {
                continue;
            }
            for (i, chunk) in wrap(paragraph.trim_end(), WRAP_COLUMNS).into_iter().enumerate() {
                // Continuation lines of a bullet hang under its text.
                let text = if i > 0 && paragraph.trim_start().starts_with('•') {
                    format!("  {chunk}")
                } else {
                    chunk
                };
                lines.push(Line::new(text, Face::Regular, 10, 13));
            }
        }
    }
    lines
}

/// Greedy word wrap at `width` characters. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits laid-out lines into pages by available height.
fn paginate(lines: Vec<Line>) -> Vec<Vec<(Line, i64)>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = vec![Vec::new()];
    let mut y = top;

    for line in lines {
        y -= line.advance;
        if y < MARGIN {
            pages.push(Vec::new());
            y = top - line.size;
        }
        if let Some(page) = pages.last_mut() {
            page.push((line, y));
        }
    }
    pages
}

/// Maps text into WinAnsiEncoding bytes. Unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn font_dictionary(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => Object::Name(b"Font".to_vec()),
        "Subtype" => Object::Name(b"Type1".to_vec()),
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => Object::Name(b"WinAnsiEncoding".to_vec()),
    }
}

fn page_content(lines: &[(Line, i64)]) -> Content {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for (line, y) in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(line.face.resource_name().as_bytes().to_vec()),
                Object::Integer(line.size),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(MARGIN), Object::Integer(*y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Builds the complete PDF in memory.
fn build_document(candidate: &CandidateRecord, sections: &SectionMap) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(regular_id),
            "F2" => Object::Reference(bold_id),
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in paginate(layout(candidate, sections)) {
        let content = page_content(&page_lines)
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Page".to_vec()),
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => Object::Name(b"Pages".to_vec()),
            "Kids" => Object::Array(kids),
            "Count" => Object::Integer(page_count),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ]),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    debug!("Rendered PDF: {} page(s), {} bytes", page_count, bytes.len());
    Ok(bytes)
}

/// Renders resumes as plain single-column PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn render(
        &self,
        candidate: &CandidateRecord,
        sections: &SectionMap,
        path: &Path,
    ) -> Result<(), RenderError> {
        let bytes = build_document(candidate, sections)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionHeader;
    use serde_json::json;

    fn sample_candidate() -> CandidateRecord {
        CandidateRecord::from_value(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "location": "Pune"
        }))
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 11));
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let lines = wrap("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_empty_text_has_no_lines() {
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_layout_orders_sections_canonically() {
        let mut sections = SectionMap::new();
        sections.insert(SectionHeader::Education, "MSc");
        sections.insert(SectionHeader::Summary, "Engineer");
        let texts: Vec<String> = layout(&sample_candidate(), &sections)
            .into_iter()
            .map(|l| l.text)
            .collect();
        assert_eq!(
            texts,
            vec!["Jane Doe", "jane@example.com | Pune", "SUMMARY", "Engineer", "EDUCATION", "MSc"]
        );
    }

    #[test]
    fn test_layout_without_name_uses_fallback() {
        let lines = layout(&CandidateRecord::default(), &SectionMap::new());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, FALLBACK_NAME);
    }

    #[test]
    fn test_long_body_spans_multiple_pages() {
        let body = (0..120).map(|i| format!("• item {i}")).collect::<Vec<_>>().join("\n");
        let sections = SectionMap::single(SectionHeader::Experience, body);
        let pages = paginate(layout(&sample_candidate(), &sections));
        assert!(pages.len() >= 2);
        assert!(pages
            .iter()
            .flatten()
            .all(|(_, y)| *y >= MARGIN && *y <= PAGE_HEIGHT - MARGIN));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("• A–B é"), vec![0x95, b' ', b'A', 0x96, b'B', b' ', 0xe9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_render_writes_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("resume.pdf");
        let sections = SectionMap::single(SectionHeader::Skills, "• Rust\n• SQL");

        PdfRenderer.render(&sample_candidate(), &sections, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"stale").unwrap();

        PdfRenderer
            .render(&sample_candidate(), &SectionMap::new(), &path)
            .unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }
}
