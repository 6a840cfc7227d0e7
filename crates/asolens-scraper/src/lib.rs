//! Store listing scraper: fetches iOS App Store / Google Play pages and
//! extracts structured listing metadata through ordered regex fallback
//! chains.
//!
//! The public entry point is [`StoreScraper::extract_app_data`], which never
//! fails: unreachable pages, non-success statuses, and timeouts all collapse
//! to the default (all-empty) [`asolens_core::AppListing`].

pub mod error;
pub mod extract;
pub mod fetch;
mod rules;
mod text;

pub use error::ScrapeError;
pub use extract::{extract_listing, StoreScraper, MAX_SCREENSHOTS};
pub use fetch::fetch_listing_page;
