//! HTTP API: router construction, response envelope, and error mapping.
//!
//! Every success body is an [`ApiResponse`] wrapping the payload, and every
//! error body is an [`ApiError`], both stamped with the request ID from
//! [`crate::middleware::request_id`].

mod extract;
mod reports;
mod status;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Extension;
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use asolens_core::AppConfig;
use asolens_report::ReportError;
use asolens_scraper::StoreScraper;

use crate::middleware::{request_id, RequestId};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scraper: StoreScraper,
}

impl AppState {
    /// Builds state from config, constructing the shared scraper client once.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let scraper = StoreScraper::new(Duration::from_secs(config.fetch_timeout_secs))?;
        Ok(Self { config, scraper })
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Success envelope: payload plus request metadata.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error envelope. The `code` string selects the HTTP status.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(request_id: String, code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps pipeline failures onto the error envelope, logging the detail and
/// keeping response messages generic for upstream faults.
pub(super) fn map_report_error(request_id: String, error: &ReportError) -> ApiError {
    tracing::error!(error = %error, "report operation failed");
    match error {
        ReportError::MissingApiKey(_) => ApiError::new(request_id, "bad_request", error.to_string()),
        ReportError::Api { .. } | ReportError::Http(_) => {
            ApiError::new(request_id, "upstream_error", "model provider request failed")
        }
        _ => ApiError::new(request_id, "internal_error", "report generation failed"),
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

/// Assembles the full router over the shared state.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/extract", post(extract::extract_listing))
        .route("/api/v1/reports", post(reports::generate_report))
        .route("/api/v1/reports/enrich", post(reports::enrich_images))
        .route("/api/v1/status", get(status::api_status))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    version: &'static str,
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> AppConfig {
        AppConfig {
            fetch_timeout_secs: 1,
            enrich_delay_ms: 0,
            ..AppConfig::default()
        }
    }

    fn test_app(config: AppConfig) -> Router {
        let state = AppState::from_config(Arc::new(config)).expect("state should build");
        build_app(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn chat_completion(content: &Value) -> Value {
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": content.to_string()}}
            ]
        })
    }

    #[tokio::test]
    async fn health_returns_ok_with_request_id() {
        let app = test_app(test_config());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["status"], "ok");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn request_id_header_is_honored() {
        let app = test_app(test_config());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "trace-me-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "trace-me-42");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["meta"]["request_id"], "trace-me-42");
    }

    #[tokio::test]
    async fn unknown_route_is_a_plain_404() {
        let app = test_app(test_config());

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn extract_scrapes_a_served_page() {
        let server = MockServer::start().await;
        let page = r#"<html><head>
            <meta property="og:title" content="ParkFinder - Street Parking">
            <meta name="description" content="Find street parking fast.">
            </head><body></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/app/parkfinder"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&server)
            .await;

        let app = test_app(test_config());
        let (status, body) = post_json(
            app,
            "/api/v1/extract",
            &json!({"url": format!("{}/app/parkfinder", server.uri()), "platform": "ios"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "ParkFinder - Street Parking");
        assert_eq!(body["data"]["description"], "Find street parking fast.");
    }

    #[tokio::test]
    async fn extract_returns_empty_listing_for_unreachable_url() {
        let app = test_app(test_config());
        let (status, body) = post_json(
            app,
            "/api/v1/extract",
            &json!({"url": "http://127.0.0.1:9/nothing", "platform": "android"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "");
        assert_eq!(body["data"]["screenshots"], json!([]));
    }

    #[tokio::test]
    async fn reports_rejects_an_invalid_request() {
        let mut config = test_config();
        config.openai_api_key = Some("sk-test".to_string());
        let app = test_app(config);

        let (status, body) = post_json(
            app,
            "/api/v1/reports",
            &json!({
                "appName": "",
                "platforms": ["ios"],
                "country": "Spain",
                "language": "Spanish"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn reports_requires_a_configured_model_key() {
        let app = test_app(test_config());

        let (status, body) = post_json(
            app,
            "/api/v1/reports",
            &json!({
                "appName": "ParkFinder",
                "platforms": ["ios"],
                "country": "Spain",
                "language": "Spanish"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("OpenAI"));
    }

    #[tokio::test]
    async fn reports_runs_the_pipeline_end_to_end() {
        let server = MockServer::start().await;
        let page = r#"<html><head>
            <meta property="og:title" content="ParkFinder">
            <meta name="description" content="Street parking maps.">
            </head><body></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/app/parkfinder"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&server)
            .await;

        let report = json!({
            "hypothesis": [{
                "title": "Lead with zone coverage",
                "description": "Drivers give up searching after ten minutes.",
                "expectedOutcome": "+8% tap-through"
            }],
            "keywords": [{"category": "parking", "terms": ["street parking"]}]
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("ParkFinder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(&report)))
            .mount(&server)
            .await;

        let mut config = test_config();
        config.openai_api_key = Some("sk-test".to_string());
        config.openai_base_url = server.uri();
        let app = test_app(config);

        let (status, body) = post_json(
            app,
            "/api/v1/reports",
            &json!({
                "appName": "ParkFinder",
                "appUrls": {"ios": format!("{}/app/parkfinder", server.uri())},
                "platforms": ["ios"],
                "country": "Spain",
                "language": "Spanish"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["report"]["hypothesis"][0]["title"],
            "Lead with zone coverage"
        );
        assert_eq!(body["data"]["primary"][0]["listing"]["title"], "ParkFinder");
        assert!(body["data"]["health"]["overallScore"].as_u64().is_some());
        assert!(body["data"]["id"].is_string());
    }

    #[tokio::test]
    async fn reports_maps_model_failures_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut config = test_config();
        config.openai_api_key = Some("sk-test".to_string());
        config.openai_base_url = server.uri();
        let app = test_app(config);

        let (status, body) = post_json(
            app,
            "/api/v1/reports",
            &json!({
                "appName": "ParkFinder",
                "platforms": ["ios"],
                "country": "Spain",
                "language": "Spanish"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "upstream_error");
    }

    #[tokio::test]
    async fn enrich_without_a_pexels_key_returns_the_report_unchanged() {
        let app = test_app(test_config());

        let report = json!({
            "culturalInsights": {
                "localData": [
                    {"fact": "Madrid expanded its regulated zones in 2024", "relevance": "parking demand"}
                ]
            }
        });
        let (status, body) = post_json(
            app,
            "/api/v1/reports/enrich",
            &json!({"report": report, "country": "Spain"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["imagesAdded"], 0);
        assert!(body["data"]["report"]["culturalInsights"]["localData"][0]["pexelsImageUrl"]
            .is_null());
    }

    #[tokio::test]
    async fn enrich_fills_missing_images_from_the_search_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("query", "madrid expanded regulated Spain parking"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [{
                    "src": {"large": "https://images.example/madrid.jpg"},
                    "alt": "Parking meters in Madrid",
                    "photographer": "Ana Torres"
                }]
            })))
            .mount(&server)
            .await;

        let mut config = test_config();
        config.pexels_api_key = Some("px-test".to_string());
        config.pexels_base_url = server.uri();
        let app = test_app(config);

        let report = json!({
            "culturalInsights": {
                "localData": [
                    {"fact": "Madrid expanded its regulated zones in 2024", "relevance": "parking demand"}
                ]
            }
        });
        let (status, body) = post_json(
            app,
            "/api/v1/reports/enrich",
            &json!({"report": report, "country": "Spain"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["imagesAdded"], 1);
        assert_eq!(
            body["data"]["report"]["culturalInsights"]["localData"][0]["pexelsImageUrl"],
            "https://images.example/madrid.jpg"
        );
    }

    #[tokio::test]
    async fn status_reports_unconfigured_keys_without_calling_out() {
        let app = test_app(test_config());

        let (status, body) = get_json(app, "/api/v1/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["openai"]["configured"], false);
        assert_eq!(body["data"]["pexels"]["configured"], false);
    }

    #[test]
    fn error_codes_select_http_statuses() {
        let cases = [
            ("bad_request", StatusCode::BAD_REQUEST),
            ("validation_error", StatusCode::BAD_REQUEST),
            ("not_found", StatusCode::NOT_FOUND),
            ("upstream_error", StatusCode::BAD_GATEWAY),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = ApiError::new("req-1".to_string(), code, "msg").into_response();
            assert_eq!(response.status(), expected, "code {code}");
        }
    }
}
