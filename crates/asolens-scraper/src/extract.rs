//! Field extraction over fetched page HTML, plus the fetch-and-extract
//! orchestrator.

use std::time::Duration;

use asolens_core::{AppListing, Platform};

use crate::error::ScrapeError;
use crate::fetch::{build_client, fetch_listing_page};
use crate::rules::{first_raw, first_text, ExtractRule, PlatformRules};
use crate::text::truncate_description;

/// Cap on collected screenshot URLs per listing.
pub const MAX_SCREENSHOTS: usize = 5;

/// Extract listing metadata from already-fetched page HTML.
///
/// Pure function of its inputs. Every field runs through its own fallback
/// chain independently: a field with no matching rule stays absent (or empty
/// for `title`/`description`) without affecting any other field, so the
/// result is always a structurally complete record.
#[must_use]
pub fn extract_listing(html: &str, platform: Platform) -> AppListing {
    let rules = PlatformRules::for_platform(platform);

    AppListing {
        title: first_text(&rules.title, html).unwrap_or_default(),
        subtitle: first_text(&rules.subtitle, html),
        description: first_text(&rules.description, html)
            .map(|text| truncate_description(&text))
            .unwrap_or_default(),
        rating: first_raw(&rules.rating, html).and_then(|v| v.parse().ok()),
        reviews_count: first_raw(&rules.reviews, html).and_then(|v| v.parse().ok()),
        icon_url: first_raw(&rules.icon, html),
        screenshots: collect_screenshots(&rules.screenshots, html),
        developer: first_text(&rules.developer, html),
        category: first_text(&rules.category, html),
    }
}

/// Scan the whole document for screenshot URLs in order, skipping exact
/// duplicates and stopping at [`MAX_SCREENSHOTS`].
fn collect_screenshots(rule: &ExtractRule, html: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for caps in rule.pattern.captures_iter(html) {
        let Some(url) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if url.is_empty() || urls.iter().any(|seen| seen == url) {
            continue;
        }
        urls.push(url.to_string());
        if urls.len() == MAX_SCREENSHOTS {
            break;
        }
    }
    urls
}

/// Fetches store pages and extracts their listings over one shared client.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct StoreScraper {
    client: reqwest::Client,
}

impl StoreScraper {
    /// Build a scraper whose fetches abort after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    /// Fetch `url` and extract its listing.
    ///
    /// Never fails. A blank URL skips the network round-trip entirely; a
    /// fetch failure or unusable page yields the default record. Single
    /// attempt per call; retry policy belongs to callers.
    pub async fn extract_app_data(&self, url: &str, platform: Platform) -> AppListing {
        if url.trim().is_empty() {
            return AppListing::default();
        }

        tracing::debug!(url, platform = %platform, "extracting listing");
        let html = fetch_listing_page(&self.client, url).await;
        if html.is_empty() {
            return AppListing::default();
        }

        let listing = extract_listing(&html, platform);
        tracing::debug!(
            platform = %platform,
            title_found = !listing.title.is_empty(),
            screenshots = listing.screenshots.len(),
            "listing extracted"
        );
        listing
    }
}
