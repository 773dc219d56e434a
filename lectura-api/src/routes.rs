use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Browser flow
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/summary", post(handlers::summary))
        .route("/entities", post(handlers::entities))
        // JSON API
        .route("/api/extract", post(handlers::api_extract))
        .route("/api/summary", post(handlers::api_summary))
        .route("/api/entities", post(handlers::api_entities))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use lectura_common::testing::{MockModels, failing_models, mock_models};
    use lectura_common::{ModelSet, Settings};
    use lectura_document::testing::pdf_with_pages;
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "lectura-test-boundary";

    fn app(models: ModelSet) -> Router {
        create_router(AppState::new(&Settings::default(), Arc::new(models)))
    }

    fn mocked() -> (MockModels, Router) {
        let mocks = mock_models("Obama spoke in Paris.");
        let router = app(mocks.set.clone());
        (mocks, router)
    }

    fn multipart_request(uri: &str, field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

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

    fn form_request(uri: &str, encoded: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encoded.to_string()))
            .unwrap()
    }

    fn json_request(uri: &str, json: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Value of the first hidden input called `name`.
    fn hidden_value<'a>(html: &'a str, name: &str) -> &'a str {
        let marker = format!(r#"name="{name}" value=""#);
        let start = html.find(&marker).unwrap() + marker.len();
        let len = html[start..].find('"').unwrap();
        &html[start..start + len]
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (_, app) = mocked();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn index_offers_pdf_upload() {
        let (_, app) = mocked();
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("PDF Reading Assistant"));
        assert!(html.contains(r#"accept=".pdf,application/pdf""#));
        assert!(!html.contains("Generate summary"));
    }

    #[tokio::test]
    async fn upload_shows_excerpt_and_actions() {
        let (mocks, app) = mocked();
        let pdf = pdf_with_pages(&["Barack Obama visited Paris", "in 2011."]);

        let response = app
            .oneshot(multipart_request("/upload", "file", "report.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Text extracted successfully from report.pdf"));
        assert!(html.contains("2 page(s)"));
        assert!(html.contains("Barack Obama visited Paris"));
        assert!(html.contains("..."));
        assert!(html.contains(r#"name="text""#));
        assert!(html.contains("Generate summary"));
        assert!(html.contains("Extract entities"));

        // Uploading never touches the models.
        assert!(mocks.summarizer.recorded().is_empty());
        assert!(mocks.recognizer.recorded().is_empty());
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let (_, app) = mocked();
        let response = app
            .oneshot(multipart_request("/upload", "other", "x.pdf", b"ignored"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("no PDF file was uploaded"));
    }

    #[tokio::test]
    async fn empty_file_name_means_no_file_chosen() {
        let (_, app) = mocked();
        let response = app
            .oneshot(multipart_request("/upload", "file", "", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_named_file_is_an_extraction_failure() {
        let (_, app) = mocked();
        let response = app
            .oneshot(multipart_request("/api/extract", "file", "x.pdf", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn long_upload_carries_only_the_analyzed_prefix() {
        let (_, app) = mocked();
        let page = "word ".repeat(300);
        let pdf = pdf_with_pages(&[&page, &page, &page]);

        let response = app
            .oneshot(multipart_request("/upload", "file", "long.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        let widest = Settings::default().limits.widest();
        assert_eq!(hidden_value(&html, "text").chars().count(), widest);
        let chars: usize = hidden_value(&html, "chars").parse().unwrap();
        assert!(chars > 3 * widest);
        assert!(html.contains(&format!("{chars} characters")));
    }

    #[tokio::test]
    async fn button_press_keeps_the_full_document_length() {
        let (_, app) = mocked();
        let response = app
            .oneshot(form_request(
                "/summary",
                "filename=long.pdf&pages=300&chars=812345&text=Barack+Obama+visited+Paris.",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("300 page(s), 812345 characters"));
        assert_eq!(hidden_value(&html, "chars"), "812345");
        assert_eq!(hidden_value(&html, "text"), "Barack Obama visited Paris.");
    }

    #[tokio::test]
    async fn unreadable_pdf_renders_error_page() {
        let (_, app) = mocked();
        let response = app
            .oneshot(multipart_request("/upload", "file", "broken.pdf", b"not a pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn summary_button_renders_summary() {
        let (mocks, app) = mocked();
        let response = app
            .oneshot(form_request(
                "/summary",
                "filename=report.pdf&pages=1&text=Barack+Obama+visited+Paris+in+2011.",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Obama spoke in Paris."));
        assert!(html.contains("Barack Obama visited Paris in 2011...."));

        let requests = mocks.summarizer.recorded();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].text, "Barack Obama visited Paris in 2011.");
        assert_eq!((requests[0].min_length, requests[0].max_length), (30, 130));
    }

    #[tokio::test]
    async fn entities_button_lists_entities() {
        let (_, app) = mocked();
        let response = app
            .oneshot(form_request(
                "/entities",
                "filename=report.pdf&pages=1&text=Barack+Obama+visited+Paris+in+2011.",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<strong>Barack Obama</strong> — PER (confidence: 99.9%)"));
        assert!(html.contains("<strong>Paris</strong> — LOC (confidence: 99.6%)"));
    }

    #[tokio::test]
    async fn api_extract_returns_normalized_text() {
        let (_, app) = mocked();
        let pdf = pdf_with_pages(&["Hello world.", "This is a test."]);

        let response = app
            .oneshot(multipart_request("/api/extract", "file", "doc.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["filename"], "doc.pdf");
        assert_eq!(json["report"]["page_count"], 2);
        let text = json["text"].as_str().unwrap();
        assert!(text.contains("Hello world."));
        assert!(!text.contains('\n'));
    }

    #[tokio::test]
    async fn api_summary_and_entities() {
        let (mocks, app) = mocked();

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/summary",
                serde_json::json!({ "text": "Barack   Obama\n\nvisited Paris." }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["summary"], "Obama spoke in Paris.");
        assert_eq!(mocks.summarizer.recorded()[0].text, "Barack Obama visited Paris.");

        let response = app
            .oneshot(json_request(
                "/api/entities",
                serde_json::json!({ "text": "Barack Obama visited Paris in 2011." }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        let entities = json["entities"].as_array().unwrap();
        assert_eq!(entities[0]["word"], "Barack Obama");
        assert_eq!(entities[0]["label"], "PER");
        assert_eq!(entities[0]["line"], "• Barack Obama — PER (confidence: 99.9%)");
    }

    #[tokio::test]
    async fn api_inference_failure_is_reported() {
        let app = app(failing_models());
        let response = app
            .oneshot(json_request(
                "/api/summary",
                serde_json::json!({ "text": "anything" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "INFERENCE_FAILED");
    }
}
