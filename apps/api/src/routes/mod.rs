pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::extraction::handlers as extraction_handlers;
use crate::matching::handlers as matching_handlers;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/parse",
            post(extraction_handlers::handle_parse_resume),
        )
        .route("/api/v1/analyze", post(matching_handlers::handle_analyze))
        .route("/api/v1/skills", get(matching_handlers::handle_list_skills))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::recovery::NoopTextRecovery;
    use crate::matching::summary::NoopSummary;

    const BOUNDARY: &str = "skillgap-test-boundary";

    fn test_router(vars: &[(&str, &str)]) -> Router {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::from_vars(|key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap();
        build_router(AppState {
            config,
            recovery: Arc::new(NoopTextRecovery),
            summarizer: Arc::new(NoopSummary),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\nstream\n\
        BT /F1 12 Tf (Jane Doe Senior Software Engineer) Tj ET\n\
        BT (Skills: Python, React, Docker and SQL across ten years) Tj ET\n\
        endstream\nendobj\n%%EOF";

    #[tokio::test]
    async fn test_health() {
        let response = test_router(&[])
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "skillgap-api");
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let request = json_request(
            "/api/v1/analyze",
            json!({
                "resumeText": "Experienced Python developer skilled in React and Docker",
                "requiredSkills": ["python", "react", "kubernetes", "sql"],
                "roleTitle": "Full Stack Developer"
            }),
        );
        let response = test_router(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["extractedSkills"], json!(["docker", "python", "react"]));
        assert_eq!(json["matchingSkills"], json!(["python", "react"]));
        assert_eq!(json["missingSkills"], json!(["kubernetes", "sql"]));
        assert_eq!(json["matchPercentage"], 50.0);
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);
        assert_eq!(json["aiSummary"], "");
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_resume() {
        let request = json_request(
            "/api/v1/analyze",
            json!({ "resumeText": "   ", "requiredSkills": ["python"] }),
        );
        let response = test_router(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_skills() {
        let response = test_router(&[])
            .oneshot(Request::get("/api/v1/skills").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let skills = json["skills"].as_array().unwrap();
        assert_eq!(json["count"].as_u64().unwrap() as usize, skills.len());
        assert!(skills.iter().any(|s| s == "python"));
    }

    #[tokio::test]
    async fn test_parse_pdf_upload() {
        let request = multipart_request("file", "resume.pdf", "application/pdf", SAMPLE_PDF);
        let response = test_router(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let text = json["text"].as_str().unwrap();
        assert!(text.contains("Jane Doe Senior Software Engineer"));
        assert!(text.contains("Python, React, Docker"));
        assert_eq!(json["fileName"], "resume.pdf");
        assert_eq!(json["kind"], "pdf");
        assert_eq!(json["source"], "heuristic");
        assert_eq!(json["charCount"].as_u64().unwrap() as usize, text.chars().count());
    }

    #[tokio::test]
    async fn test_parse_rejects_unsupported_format() {
        let request = multipart_request("file", "photo.png", "image/png", b"\x89PNG\r\n");
        let response = test_router(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_parse_requires_file_field() {
        let request = multipart_request("attachment", "resume.pdf", "application/pdf", SAMPLE_PDF);
        let response = test_router(&[]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_rejects_oversized_upload() {
        let request = multipart_request("file", "resume.pdf", "application/pdf", SAMPLE_PDF);
        let response = test_router(&[("MAX_UPLOAD_BYTES", "64")])
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "TOO_LARGE");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_router(&[])
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
