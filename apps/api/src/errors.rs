use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::tailor::TailorError;
use crate::ingest::reader::ReadError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ReadError> for AppError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::UnsupportedFormat(ext) => AppError::UnsupportedFormat(format!(
                "'{ext}' files are not supported. Please upload .txt, .md, or .pdf."
            )),
            ReadError::Io(e) => AppError::Io(e),
            ReadError::Pdf(msg) => AppError::Internal(anyhow::anyhow!("PDF extraction failed: {msg}")),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Generation(err.to_string())
    }
}

impl From<TailorError> for AppError {
    fn from(err: TailorError) -> Self {
        match err {
            TailorError::Generation(msg) => AppError::Generation(msg),
            TailorError::EmptyGeneration => {
                AppError::Generation("tailoring model returned empty text".to_string())
            }
            TailorError::Render(e) => AppError::Render(e.to_string()),
            TailorError::Serialize(e) => {
                AppError::Internal(anyhow::anyhow!("Failed to serialize prompt data: {e}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "The language model call failed".to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The resume document could not be rendered".to_string(),
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;

    #[test]
    fn test_unsupported_format_maps_to_415() {
        let err: AppError = ReadError::UnsupportedFormat(".docx".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_empty_generation_maps_to_generation_error() {
        let err: AppError = TailorError::EmptyGeneration.into();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_render_failure_keeps_cause_in_message() {
        let err: AppError = TailorError::Render(RenderError::Pdf("font table".to_string())).into();
        assert!(err.to_string().contains("font table"));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("jd_text cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
