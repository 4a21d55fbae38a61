//! Document Reader — loads resume or JD text from `.txt`, `.md` and `.pdf` sources.
//!
//! The format is chosen by extension only (case-insensitive). PDF extraction
//! is CPU-bound and runs on the blocking pool.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
}

impl DocumentFormat {
    /// Detects the format from a file name or path. Unknown or missing
    /// extensions are rejected with the offending extension.
    pub fn from_name(name: &str) -> Result<Self, ReadError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" | "md" => Ok(DocumentFormat::PlainText),
            "pdf" => Ok(DocumentFormat::Pdf),
            "" => Err(ReadError::UnsupportedFormat("(none)".to_string())),
            other => Err(ReadError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Reads a document from disk. Text files are decoded as UTF-8, replacing invalid sequences.
pub async fn read_text(path: &Path) -> Result<String, ReadError> {
    let name = path.to_string_lossy();
    let format = DocumentFormat::from_name(&name)?;
    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode(format, Bytes::from(bytes)).await
}

/// Reads an uploaded document held in memory. `file_name` selects the format.
pub async fn read_text_from_bytes(file_name: &str, bytes: Bytes) -> Result<String, ReadError> {
    let format = DocumentFormat::from_name(file_name)?;
    decode(format, bytes).await
}

async fn decode(format: DocumentFormat, bytes: Bytes) -> Result<String, ReadError> {
    match format {
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        DocumentFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ReadError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ReadError::Pdf(format!("extraction task failed: {e}")))?,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_name("cv.TXT").unwrap(), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_name("notes.md").unwrap(), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_name("/a/b/Resume.Pdf").unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_unknown_extensions_rejected() {
        match DocumentFormat::from_name("resume.docx") {
            Err(ReadError::UnsupportedFormat(ext)) => assert_eq!(ext, ".docx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
        assert!(matches!(
            DocumentFormat::from_name("README"),
            Err(ReadError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Doe\nPython").unwrap();
        assert_eq!(read_text(&path).await.unwrap(), "Jane Doe\nPython");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let text = read_text_from_bytes("jd.md", Bytes::from_static(b"Rust \xff engineer"))
            .await
            .unwrap();
        assert_eq!(text, "Rust \u{fffd} engineer");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = read_text(Path::new("/definitely/not/here.txt")).await.unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }

    #[tokio::test]
    async fn test_unsupported_upload_rejected_before_reading() {
        let err = read_text_from_bytes("cv.docx", Bytes::from_static(b"PK"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_pdf_error() {
        let err = read_text_from_bytes("cv.pdf", Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadError::Pdf(_)));
    }
}
