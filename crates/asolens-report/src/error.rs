use thiserror::Error;

/// Errors produced while generating or enriching a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An operation needed an API key that is not configured.
    #[error("missing {0} API key")]
    MissingApiKey(&'static str),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper error: {0}")]
    Scrape(#[from] asolens_scraper::ScrapeError),

    /// The provider answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The completion came back without any usable message content.
    #[error("model response contained no content")]
    EmptyCompletion,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
