//! Listing-page retrieval with browser-like headers and total error
//! suppression.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;

use crate::error::ScrapeError;

/// Desktop browser profile; the stores serve stripped-down pages to
/// non-browser agents.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANG: &str = "en-US,en;q=0.9";

/// Build the shared HTTP client used for listing fetches.
///
/// `timeout` bounds the whole request; reqwest aborts the in-flight request
/// when it elapses.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANG));

    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Fetch a listing page, collapsing every failure mode to an empty body.
///
/// Non-success statuses, network errors, timeouts, and body-read failures
/// are logged and swallowed; callers treat `""` as "page unavailable".
pub async fn fetch_listing_page(client: &Client, url: &str) -> String {
    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(url, error = %err, "listing fetch failed");
            return String::new();
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = %status, "listing fetch returned non-success status");
        return String::new();
    }

    match response.text().await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(url, error = %err, "listing body read failed");
            String::new()
        }
    }
}
