pub mod health;
pub mod pdf;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-pdf", post(pdf::handle_generate_pdf))
        .route(
            "/generate-pdf-with-data",
            post(pdf::handle_generate_pdf_with_data),
        )
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::layout::default_template;
    use crate::storage::testing::RecordingStore;
    use crate::storage::LinkMode;

    fn test_config() -> Config {
        Config {
            s3_bucket: "docs".to_string(),
            s3_endpoint: None,
            s3_region: "us-east-1".to_string(),
            s3_public_base_url: None,
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            signed_url_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            logo_path: PathBuf::from("/nonexistent/static/logo.png"),
            brand_name: "NeuroLight".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn app(store: Arc<RecordingStore>) -> Router {
        build_router(AppState {
            config: Arc::new(test_config()),
            store,
            template: Arc::new(default_template()),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let store = Arc::new(RecordingStore::default());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "PDF Generation API");
    }

    #[tokio::test]
    async fn test_generate_public_link() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) = post_json(
            app(store.clone()),
            "/generate-pdf",
            json!({ "content": "REPORT\n* first\n* second\nAll good." }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["success"], true);
        assert_eq!(body["content_type"], "application/pdf");
        assert_eq!(body["secure_url"], false);
        assert!(body.get("pdf_data").is_none());

        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("resource_") && filename.ends_with(".pdf"));
        assert_eq!(filename.len(), "resource_20240101_000000.pdf".len());

        let puts = store.recorded();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].key, format!("pdfs/{filename}"));
        assert_eq!(puts[0].content_type, "application/pdf");
        assert_eq!(puts[0].mode, LinkMode::Public);
        assert!(puts[0].body.starts_with(b"%PDF-"));
        assert_eq!(body["size"], puts[0].body.len());
        assert_eq!(body["download_url"], format!("https://storage.test/pdfs/{filename}"));
    }

    #[tokio::test]
    async fn test_generate_signed_link() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) = post_json(
            app(store.clone()),
            "/generate-pdf",
            json!({ "content": "Hello", "secure": true }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["secure_url"], true);
        assert!(body["download_url"]
            .as_str()
            .unwrap()
            .ends_with("X-Amz-Expires=604800"));
        assert_eq!(
            store.recorded()[0].mode,
            LinkMode::Signed {
                ttl: Duration::from_secs(604_800)
            }
        );
    }

    #[tokio::test]
    async fn test_generate_with_data_returns_base64_pdf() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) = post_json(
            app(store.clone()),
            "/generate-pdf-with-data",
            json!({ "content": "Inline copy please", "secure": false }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        let decoded = STANDARD.decode(body["pdf_data"].as_str().unwrap()).unwrap();
        assert_eq!(decoded, store.recorded()[0].body.to_vec());
        assert_eq!(body["size"], decoded.len());
        assert!(body["download_url"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_is_bad_request() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) =
            post_json(app(store.clone()), "/generate-pdf", json!({ "secure": true })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Missing 'content' in request");
        assert!(store.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_blank_content_is_bad_request() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) = post_json(
            app(store.clone()),
            "/generate-pdf-with-data",
            json!({ "content": "   \n  " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Content cannot be empty");
        assert!(store.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_is_internal_error() {
        let store = Arc::new(RecordingStore::failing());
        let (status, body) =
            post_json(app(store), "/generate-pdf", json!({ "content": "Hello" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
    }

    #[tokio::test]
    async fn test_null_secure_means_public() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) = post_json(
            app(store.clone()),
            "/generate-pdf",
            json!({ "content": "Hello", "secure": null }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["secure_url"], false);
        assert_eq!(store.recorded()[0].mode, LinkMode::Public);
    }
}
