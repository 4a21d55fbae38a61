//! JSON persistence for stage outputs.
//!
//! Records are written pretty-printed (2-space indent, non-ASCII kept as-is).
//! Candidate records are re-validated on load since they may have been
//! edited by hand between stages.

use std::io;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::info;

use crate::models::CandidateRecord;

/// Writes `value` as pretty JSON, creating parent directories. Overwrites.
pub async fn save_json<T: Serialize>(value: &T, path: &Path) -> io::Result<()> {
    let mut json = serde_json::to_vec_pretty(value).map_err(io::Error::from)?;
    json.push(b'\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;
    info!("Saved {}", path.display());
    Ok(())
}

/// Reads a JSON file into `T`. Malformed JSON is `InvalidData`.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let bytes = tokio::fs::read(path).await?;
    serde_json::from_slice(&bytes).map_err(io::Error::from)
}

/// Loads a persisted candidate record, coercing fields like a fresh extraction.
pub async fn load_candidate(path: &Path) -> io::Result<CandidateRecord> {
    let value: Value = load_json(path).await?;
    Ok(CandidateRecord::from_value(value))
}
