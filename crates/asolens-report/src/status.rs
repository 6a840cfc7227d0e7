//! Connectivity checks for the configured API keys.
//!
//! Each check makes one cheap authenticated call and maps the outcome to a
//! [`KeyStatus`]. Checks never fail; an unreachable service is reported the
//! same way as a rejected key, through `valid` and `detail`.

use std::time::Duration;

use asolens_core::AppConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const STATUS_TIMEOUT_SECS: u64 = 15;

/// Outcome of probing one API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    pub configured: bool,
    pub valid: bool,
    pub detail: String,
}

impl KeyStatus {
    fn not_configured() -> Self {
        Self {
            configured: false,
            valid: false,
            detail: "API key not configured".to_string(),
        }
    }

    fn valid() -> Self {
        Self {
            configured: true,
            valid: true,
            detail: "API key is valid and working".to_string(),
        }
    }

    fn invalid(detail: String) -> Self {
        Self {
            configured: true,
            valid: false,
            detail,
        }
    }
}

/// Key statuses for every external service the app talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub openai: KeyStatus,
    pub pexels: KeyStatus,
}

/// Probe every configured key. Missing keys are reported as not configured
/// without any network traffic.
pub async fn check_api_status(config: &AppConfig) -> StatusReport {
    let openai = match config.openai_api_key.as_deref() {
        Some(key) => check_openai(key, &config.openai_base_url).await,
        None => KeyStatus::not_configured(),
    };
    let pexels = match config.pexels_api_key.as_deref() {
        Some(key) => check_pexels(key, &config.pexels_base_url).await,
        None => KeyStatus::not_configured(),
    };
    StatusReport { openai, pexels }
}

/// Verify an OpenAI key by listing models.
pub async fn check_openai(api_key: &str, base_url: &str) -> KeyStatus {
    let url = format!("{}/models", base_url.trim_end_matches('/'));
    let client = match http_client() {
        Ok(client) => client,
        Err(e) => return KeyStatus::invalid(format!("Failed to connect to OpenAI API: {e}")),
    };

    match client.get(&url).bearer_auth(api_key).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                KeyStatus::valid()
            } else if status == StatusCode::UNAUTHORIZED {
                KeyStatus::invalid(
                    "Invalid API key. Please check your key and try again.".to_string(),
                )
            } else if status == StatusCode::TOO_MANY_REQUESTS {
                KeyStatus::invalid(
                    "Rate limit exceeded. You may have run out of credits.".to_string(),
                )
            } else {
                KeyStatus::invalid(format!("API error: {status}"))
            }
        }
        Err(e) => KeyStatus::invalid(format!("Failed to connect to OpenAI API: {e}")),
    }
}

/// Verify a Pexels key with a minimal one-result search.
pub async fn check_pexels(api_key: &str, base_url: &str) -> KeyStatus {
    let url = format!("{}/v1/search", base_url.trim_end_matches('/'));
    let client = match http_client() {
        Ok(client) => client,
        Err(e) => return KeyStatus::invalid(format!("Failed to connect to Pexels API: {e}")),
    };

    let result = client
        .get(&url)
        .header("Authorization", api_key)
        .query(&[("query", "test"), ("per_page", "1")])
        .send()
        .await;

    match result {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                KeyStatus::valid()
            } else if status == StatusCode::UNAUTHORIZED {
                KeyStatus::invalid(
                    "Invalid API key. Please check your key and try again.".to_string(),
                )
            } else {
                KeyStatus::invalid(format!("API error: {status}"))
            }
        }
        Err(e) => KeyStatus::invalid(format!("Failed to connect to Pexels API: {e}")),
    }
}

fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(STATUS_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("asolens/0.1 (aso-reports)")
        .build()
}
