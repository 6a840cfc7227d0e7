use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
