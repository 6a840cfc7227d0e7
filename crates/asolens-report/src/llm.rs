//! OpenAI-compatible chat-completions client.
//!
//! Carries the transport only; prompts come from [`crate::prompt`] and the
//! response shapes live in [`crate::schema`]. Use [`LlmClient::new`] for the
//! hosted API or [`LlmClient::with_base_url`] to point at a mock server in
//! tests.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::schema::{AsoReport, Suggestions};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Structured reports can take minutes to generate.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Matches the creative-but-grounded setting the report prompt was tuned for.
const TEMPERATURE: f64 = 0.7;

/// Suggestions are a much smaller document than the full report.
const SUGGEST_MAX_TOKENS: u32 = 2000;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    /// Creates a client pointed at the hosted OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str) -> Result<Self, ReportError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock,
    /// or any OpenAI-compatible provider).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("asolens/0.1 (aso-reports)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Generate a structured report from the prepared prompt.
    ///
    /// Requests JSON-object output and parses the first choice's content as
    /// an [`AsoReport`].
    ///
    /// # Errors
    ///
    /// - [`ReportError::Api`] on a non-success provider status.
    /// - [`ReportError::Http`] on network failure.
    /// - [`ReportError::EmptyCompletion`] when no content came back.
    /// - [`ReportError::Deserialize`] when the content is not a valid report.
    pub async fn generate_report(&self, prompt: &str) -> Result<AsoReport, ReportError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: None,
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let content = self.complete(&request).await?;
        let json = strip_code_fences(&content);
        serde_json::from_str(json).map_err(|e| ReportError::Deserialize {
            context: "report completion".to_string(),
            source: e,
        })
    }

    /// Generate keyword/competitor/market suggestions from the prepared
    /// prompt.
    ///
    /// The suggestion call runs without JSON mode, so the answer may arrive
    /// fenced or as plain prose; unparseable output degrades to an empty
    /// suggestion set carrying the raw text in `recommendations`.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Api`] on a non-success provider status.
    /// - [`ReportError::Http`] on network failure.
    /// - [`ReportError::EmptyCompletion`] when no content came back.
    pub async fn suggest(&self, prompt: &str) -> Result<Suggestions, ReportError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: Some(SUGGEST_MAX_TOKENS),
            response_format: None,
        };

        let content = self.complete(&request).await?;
        let json = strip_code_fences(&content);
        Ok(serde_json::from_str(json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "suggestions were not valid JSON, keeping raw text");
            Suggestions {
                recommendations: content.trim().to_string(),
                ..Suggestions::default()
            }
        }))
    }

    /// Sends one chat-completion request and returns the first choice's
    /// content.
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ReportError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let completion: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ReportError::Deserialize {
                context: "chat completion envelope".to_string(),
                source: e,
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ReportError::EmptyCompletion)
    }
}

/// Strip optional markdown code fences around a JSON payload.
fn strip_code_fences(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
