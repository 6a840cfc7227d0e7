//! Pexels image lookup and search-query construction.
//!
//! Enrichment only ever needs "one decent landscape photo for this query",
//! so the search surface is a single-method trait; the walker in
//! [`crate::enrich`] stays testable with a scripted stand-in.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ReportError;

const DEFAULT_BASE_URL: &str = "https://api.pexels.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Query-term caps: up to 3 fact words, the country, up to 2 context words,
/// at most 5 terms overall.
const MAX_FACT_TERMS: usize = 3;
const MAX_CONTEXT_TERMS: usize = 2;
const MAX_QUERY_TERMS: usize = 5;

/// Spanish and English filler words excluded from image queries.
const STOP_WORDS: &[&str] = &[
    "el", "la", "los", "las", "de", "del", "en", "y", "o", "a", "un", "una", "es", "son", "con",
    "por", "para", "que", "se", "le", "les", "lo", "al", "unos", "unas", "este", "esta", "estos",
    "estas", "ese", "esa", "esos", "esas", "aquel", "aquella", "aquellos", "aquellas", "the",
    "is", "are", "and", "or", "an", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// An image resolved for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundImage {
    pub url: String,
    pub description: String,
}

/// One-shot image lookup used by report enrichment.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Find one landscape image for `query`; `None` on a miss or any failure.
    async fn search(&self, query: &str) -> Option<FoundImage>;
}

/// Client for the Pexels photo-search API.
pub struct PexelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PexelsClient {
    /// Creates a client pointed at the hosted Pexels API.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self, ReportError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("asolens/0.1 (aso-reports)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ImageSearch for PexelsClient {
    async fn search(&self, query: &str) -> Option<FoundImage> {
        if self.api_key.is_empty() || query.is_empty() {
            tracing::warn!("missing Pexels API key or query, skipping lookup");
            return None;
        }

        let url = format!("{}/v1/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", "1"),
                ("orientation", "landscape"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(query, error = %e, "Pexels request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(query, status = %response.status(), "Pexels returned an error status");
            return None;
        }

        let body: SearchResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(query, error = %e, "Pexels response parse failed");
                return None;
            }
        };

        body.photos
            .into_iter()
            .next()
            .and_then(|photo| image_from(photo, query))
    }
}

/// Pick the best available rendition and describe the hit.
fn image_from(photo: Photo, query: &str) -> Option<FoundImage> {
    let url = photo.src.large.or(photo.src.medium).or(photo.src.small)?;
    let description = match photo.photographer {
        Some(photographer) if !photographer.is_empty() => {
            format!("Photo by {photographer}: {query}")
        }
        _ => format!("Image: {query}"),
    };
    Some(FoundImage { url, description })
}

/// Build an image query from a local fact, the target country, and optional
/// extra context.
///
/// Keeps meaningful words only: punctuation collapses to spaces, and words
/// of three characters or fewer plus [`STOP_WORDS`] are dropped. The country
/// is kept verbatim.
#[must_use]
pub fn build_image_query(fact: &str, country: &str, context: Option<&str>) -> String {
    let mut terms = key_terms(fact, MAX_FACT_TERMS);
    let country = country.trim();
    if !country.is_empty() {
        terms.push(country.to_string());
    }
    if let Some(context) = context {
        terms.extend(key_terms(context, MAX_CONTEXT_TERMS));
    }
    terms.truncate(MAX_QUERY_TERMS);
    terms.join(" ")
}

fn key_terms(text: &str, max: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 3 && !STOP_WORDS.contains(word))
        .take(max)
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    src: PhotoSrc,
    #[serde(default)]
    photographer: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PhotoSrc {
    large: Option<String>,
    medium: Option<String>,
    small: Option<String>,
}
