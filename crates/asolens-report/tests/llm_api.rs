//! Integration tests for the model client and API key status probes.
//!
//! `wiremock` stands in for the OpenAI and Pexels APIs so tests exercise the
//! real request shapes (paths, auth headers, JSON-mode flags) without any
//! external traffic.

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use asolens_report::{check_openai, check_pexels, LlmClient, ReportError};

fn test_client(server: &MockServer) -> LlmClient {
    LlmClient::with_base_url("sk-test", "gpt-4o", &server.uri())
        .expect("failed to build test LlmClient")
}

/// Wraps `content` in a chat-completion envelope.
fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

// ---------------------------------------------------------------------------
// generate_report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_report_parses_model_json() {
    let server = MockServer::start().await;

    let report_json = json!({
        "hypothesis": [{
            "title": "Lean into zona azul coverage",
            "description": "Regulated-zone terms dominate local search.",
            "expectedOutcome": "+10% conversion"
        }],
        "keywords": [{ "category": "Core", "terms": ["parking", "zona azul"] }]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&report_json)))
        .mount(&server)
        .await;

    let report = test_client(&server)
        .generate_report("prompt")
        .await
        .expect("report should parse");

    assert_eq!(report.hypothesis.len(), 1);
    assert_eq!(report.hypothesis[0].title, "Lean into zona azul coverage");
    assert_eq!(report.keywords.len(), 1);
    assert_eq!(report.keywords[0].terms, vec!["parking", "zona azul"]);
    // Unmentioned sections default to empty.
    assert!(report.recommendations.is_empty());
}

#[tokio::test]
async fn generate_report_strips_code_fences() {
    let server = MockServer::start().await;

    let fenced = "```json\n{\"visualSummary\": \"Fenced but fine\"}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(fenced)))
        .mount(&server)
        .await;

    let report = test_client(&server)
        .generate_report("prompt")
        .await
        .expect("fenced JSON should parse");

    assert_eq!(report.visual_summary.as_deref(), Some("Fenced but fine"));
}

#[tokio::test]
async fn generate_report_rejects_non_json_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("sorry, no")))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .generate_report("prompt")
        .await
        .expect_err("prose content must not parse as a report");

    assert!(matches!(err, ReportError::Deserialize { .. }), "got: {err}");
}

#[tokio::test]
async fn provider_error_status_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .generate_report("prompt")
        .await
        .expect_err("500 must surface");

    match err {
        ReportError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn empty_choices_yield_empty_completion_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .generate_report("prompt")
        .await
        .expect_err("empty choices must surface");

    assert!(matches!(err, ReportError::EmptyCompletion), "got: {err}");
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suggest_parses_structured_json() {
    let server = MockServer::start().await;

    let suggestions_json = json!({
        "keywords": [{
            "keyword": "parking madrid",
            "intent": "navigational",
            "searchVolume": "high",
            "competition": "medium"
        }],
        "competitors": [{ "name": "ParkRival", "reason": "same market" }],
        "markets": [{ "country": "Italy", "language": "Italian", "opportunity": "ZTL confusion" }],
        "recommendations": "Target zone-specific terms."
    })
    .to_string();

    // Suggestions run without JSON mode but with a token cap.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "max_tokens": 2000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&suggestions_json)))
        .mount(&server)
        .await;

    let suggestions = test_client(&server)
        .suggest("prompt")
        .await
        .expect("suggestions should parse");

    assert_eq!(suggestions.keywords.len(), 1);
    assert_eq!(suggestions.keywords[0].keyword, "parking madrid");
    assert_eq!(suggestions.competitors[0].name, "ParkRival");
    assert_eq!(suggestions.markets[0].country, "Italy");
    assert_eq!(suggestions.recommendations, "Target zone-specific terms.");
}

#[tokio::test]
async fn suggest_keeps_raw_text_when_not_json() {
    let server = MockServer::start().await;

    let prose = "Try \"parking near me\" and benchmark against EasyPark.";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(prose)))
        .mount(&server)
        .await;

    let suggestions = test_client(&server)
        .suggest("prompt")
        .await
        .expect("prose must degrade, not fail");

    assert!(suggestions.keywords.is_empty());
    assert_eq!(suggestions.recommendations, prose);
}

#[tokio::test]
async fn suggest_sends_the_prompt_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("You are an ASO expert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .suggest("You are an ASO expert. Suggest keywords.")
        .await
        .expect("suggest should succeed");
}

// ---------------------------------------------------------------------------
// API key status probes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn openai_probe_reports_valid_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let status = check_openai("sk-test", &server.uri()).await;
    assert!(status.configured);
    assert!(status.valid);
    assert_eq!(status.detail, "API key is valid and working");
}

#[tokio::test]
async fn openai_probe_distinguishes_bad_key_from_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let bad_key = check_openai("sk-bad", &server.uri()).await;
    assert!(!bad_key.valid);
    assert_eq!(
        bad_key.detail,
        "Invalid API key. Please check your key and try again."
    );

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let limited = check_openai("sk-test", &server.uri()).await;
    assert!(!limited.valid);
    assert_eq!(
        limited.detail,
        "Rate limit exceeded. You may have run out of credits."
    );
}

#[tokio::test]
async fn openai_probe_reports_other_statuses_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let status = check_openai("sk-test", &server.uri()).await;
    assert!(!status.valid);
    assert!(status.detail.starts_with("API error: 503"));
}

#[tokio::test]
async fn pexels_probe_runs_a_minimal_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("query", "test"))
        .and(query_param("per_page", "1"))
        .and(header("authorization", "px-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "photos": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let status = check_pexels("px-test", &server.uri()).await;
    assert!(status.valid);
}

#[tokio::test]
async fn pexels_probe_reports_bad_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let status = check_pexels("px-bad", &server.uri()).await;
    assert!(status.configured);
    assert!(!status.valid);
    assert_eq!(
        status.detail,
        "Invalid API key. Please check your key and try again."
    );
}

#[tokio::test]
async fn unreachable_service_reports_connection_failure() {
    // A builder-made server is not pooled, so dropping it actually closes
    // the listener and leaves the address unreachable.
    let server = MockServer::builder().start().await;
    let dead_uri = server.uri();
    drop(server);

    let status = check_openai("sk-test", &dead_uri).await;
    assert!(status.configured);
    assert!(!status.valid);
    assert!(status.detail.starts_with("Failed to connect to OpenAI API"));
}
