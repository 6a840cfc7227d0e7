//! ASO report generation: scrape-backed prompt assembly, model calls,
//! stock-photo enrichment, and API key status probes.
//!
//! [`ReportPipeline::run`] is the main entry point; it turns a
//! [`asolens_core::ReportRequest`] into a [`ReportBundle`] holding the
//! generated report plus everything that fed it. [`enrich_report`] fills a
//! report's image slots afterwards, and [`check_api_status`] verifies the
//! configured keys.

pub mod enrich;
pub mod error;
pub mod llm;
pub mod niche;
pub mod pexels;
pub mod pipeline;
pub mod prompt;
pub mod schema;
pub mod status;

pub use enrich::enrich_report;
pub use error::ReportError;
pub use llm::LlmClient;
pub use pexels::{build_image_query, FoundImage, ImageSearch, PexelsClient};
pub use pipeline::{PlatformListing, ReportBundle, ReportPipeline};
pub use schema::{AsoReport, Suggestions};
pub use status::{check_api_status, check_openai, check_pexels, KeyStatus, StatusReport};
