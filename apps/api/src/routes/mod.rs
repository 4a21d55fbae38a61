pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::ingest::handlers as ingest;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stage 2
        .route("/api/v1/jd/parse", post(generation::handle_parse_jd))
        // Stage 1
        .route("/api/v1/resumes/extract", post(ingest::handle_extract))
        // Stage 3
        .route("/api/v1/resumes/tailor", post(generation::handle_tailor))
        // Stage 1 → 3
        .route("/api/v1/resumes/pipeline", post(generation::handle_pipeline))
        .route("/api/v1/ats/score", post(generation::handle_ats_score))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::test_support::test_state;

    const EXTRACTION: &str = r#"{"name": "Jane Doe", "skills": ["Python"]}"#;
    const TAILORED: &str = "SUMMARY\nBackend engineer\n\nSKILLS\n• python\n• java";
    const BOUNDARY: &str = "X-TAILOR-BOUNDARY";

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Builds a multipart body from (name, optional file name, content) parts.
    fn multipart_post(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "tailor-api");
    }

    #[tokio::test]
    async fn test_parse_jd_returns_record_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), EXTRACTION, TAILORED);
        let jd_path = state.config.jd_json_path();
        let router = build_router(state);

        let (status, body) = send(
            router,
            json_post(
                "/api/v1/jd/parse",
                json!({"jd_text": "Job Title: Data Engineer\nRequirements: Python; SQL"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"]["job_title"], "Data Engineer");
        assert_eq!(body["job_description"]["must_have_skills"], json!(["Python", "SQL"]));
        assert!(body["job_description"]["nice_to_have_skills"]
            .as_array()
            .unwrap()
            .is_empty());
        assert!(jd_path.is_file());
    }

    #[tokio::test]
    async fn test_blank_jd_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(router, json_post("/api/v1/jd/parse", json!({"jd_text": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_from_text_field() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(
            router,
            multipart_post(
                "/api/v1/resumes/extract",
                &[("resume_text", None, "Jane Doe\nPython developer")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate"]["name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_extract_from_uploaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(
            router,
            multipart_post(
                "/api/v1/resumes/extract",
                &[("file", Some("resume.txt"), "Jane Doe\nPython developer")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate"]["skills"], json!(["Python"]));
    }

    #[tokio::test]
    async fn test_docx_upload_is_415() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(
            router,
            multipart_post("/api/v1/resumes/extract", &[("file", Some("resume.docx"), "PK")]),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_tailor_with_inline_records() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(
            router,
            json_post(
                "/api/v1/resumes/tailor",
                json!({
                    "candidate": {"name": "Jane Doe", "skills": ["Python"]},
                    "job_description": {"must_have_skills": ["Python", "Java"]},
                    "output_path": "jane.pdf"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["original_score"], 50.0);
        assert_eq!(body["report"]["tailored_score"], 100.0);
        assert_eq!(body["sections"]["SKILLS"], "• python\n• java");
        assert!(body["output_path"].as_str().unwrap().ends_with("tailored_pdfs/jane.pdf"));
    }

    #[tokio::test]
    async fn test_tailor_without_persisted_records_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, _) = send(router, json_post("/api/v1/resumes/tailor", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pipeline_runs_all_stages() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(
            router,
            multipart_post(
                "/api/v1/resumes/pipeline",
                &[
                    ("file", Some("resume.md"), "Jane Doe\nPython"),
                    ("jd_text", None, "Requirements:\n- Python\n- Java"),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate"]["name"], "Jane Doe");
        assert_eq!(body["tailoring"]["report"]["improvement"], 50.0);
        assert!(body["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_pipeline_without_jd_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, _) = send(
            router,
            multipart_post(
                "/api/v1/resumes/pipeline",
                &[("resume_text", None, "Jane Doe")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ats_score_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(test_state(dir.path(), EXTRACTION, TAILORED));
        let (status, body) = send(
            router,
            json_post(
                "/api/v1/ats/score",
                json!({"text": "python sql data", "keywords": ["python", "sql", "java"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 66.67);
    }
}
