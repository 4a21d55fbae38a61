use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_EXTRACTION_MODEL: &str = "claude-3-5-haiku-latest";
const DEFAULT_TAILORING_MODEL: &str = "claude-sonnet-4-5";

/// How the binary runs: HTTP service or a single batch pass over `input_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Server,
    Cli,
}

impl RunMode {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "server" => Ok(RunMode::Server),
            "cli" => Ok(RunMode::Cli),
            other => bail!("RUN_MODE must be 'server' or 'cli', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Built once at startup and passed explicitly to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Model used by Stage 1 (resume field extraction).
    pub extraction_model: String,
    /// Model used by Stage 3 (resume tailoring).
    pub tailoring_model: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: RunMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            extraction_model: env_or("EXTRACTION_MODEL", DEFAULT_EXTRACTION_MODEL),
            tailoring_model: env_or("TAILORING_MODEL", DEFAULT_TAILORING_MODEL),
            input_dir: PathBuf::from(env_or("INPUT_DIR", "input")),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "output")),
            mode: RunMode::parse(&env_or("RUN_MODE", "server"))?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Configuration rooted at `base`, for tests.
    #[cfg(test)]
    pub fn with_base_dir(base: &std::path::Path) -> Self {
        Config {
            anthropic_api_key: String::new(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            tailoring_model: DEFAULT_TAILORING_MODEL.to_string(),
            input_dir: base.join("input"),
            output_dir: base.join("output"),
            mode: RunMode::Cli,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    pub fn structured_json_dir(&self) -> PathBuf {
        self.output_dir.join("structured_json")
    }

    pub fn tailored_pdf_dir(&self) -> PathBuf {
        self.output_dir.join("tailored_pdfs")
    }

    pub fn candidate_json_path(&self) -> PathBuf {
        self.structured_json_dir().join("candidate_output.json")
    }

    pub fn jd_json_path(&self) -> PathBuf {
        self.structured_json_dir().join("job_description.json")
    }

    /// Creates the input and output directory tree if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.input_dir.clone(),
            self.structured_json_dir(),
            self.tailored_pdf_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;
        }
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
