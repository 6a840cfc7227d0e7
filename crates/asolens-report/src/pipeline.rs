//! End-to-end report generation: scrape, prompt, generate, score.

use asolens_core::{
    calculate_health_score, AppConfig, AppListing, CompetitorRef, HealthInputs, HealthScore,
    Platform, ReportRequest,
};
use asolens_scraper::StoreScraper;
use chrono::{DateTime, Utc};
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::error::ReportError;
use crate::llm::LlmClient;
use crate::prompt::{build_report_prompt, build_suggest_prompt};
use crate::schema::{AsoReport, Suggestions};

/// A primary listing tagged with the store it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformListing {
    pub platform: Platform,
    pub listing: AppListing,
}

/// A generated report together with everything that went into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub request: ReportRequest,
    pub primary: Vec<PlatformListing>,
    pub competitors: Vec<AppListing>,
    pub report: AsoReport,
    pub health: HealthScore,
}

/// Drives one report run: store extraction, prompt assembly, model call,
/// and health scoring.
#[derive(Debug)]
pub struct ReportPipeline {
    scraper: StoreScraper,
    llm: LlmClient,
    max_concurrent: usize,
}

impl ReportPipeline {
    #[must_use]
    pub fn new(scraper: StoreScraper, llm: LlmClient, max_concurrent: usize) -> Self {
        Self {
            scraper,
            llm,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Build a pipeline from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingApiKey`] when no OpenAI key is
    /// configured, or [`ReportError::Http`] / [`ReportError::Scrape`] when a
    /// client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ReportError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(ReportError::MissingApiKey("OpenAI"))?;
        let llm = LlmClient::with_base_url(api_key, &config.openai_model, &config.openai_base_url)?;
        let scraper = StoreScraper::new(Duration::from_secs(config.fetch_timeout_secs))?;
        Ok(Self::new(scraper, llm, config.max_concurrent_extractions))
    }

    /// Run the full pipeline for `request`.
    ///
    /// Store extraction never aborts the run: platforms or competitors whose
    /// pages cannot be read simply contribute empty data, and the prompt
    /// marks the gaps. Only the model call itself can fail.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the model call fails or its reply cannot
    /// be parsed into a report.
    pub async fn run(&self, request: &ReportRequest) -> Result<ReportBundle, ReportError> {
        // Step 1: primary listings, one per requested platform.
        let mut primary: Vec<(Platform, AppListing)> = Vec::with_capacity(request.platforms.len());
        for &platform in &request.platforms {
            let url = request.app_urls.url_for(platform).unwrap_or_default();
            let listing = self.scraper.extract_app_data(url, platform).await;
            if listing.is_empty() {
                tracing::warn!(%platform, "no usable primary listing extracted");
            }
            primary.push((platform, listing));
        }

        // Step 2: competitor listings, fanned out with bounded concurrency.
        let competitors = self.extract_competitors(request).await;
        tracing::info!(
            requested = request.competitors.len(),
            extracted = competitors.len(),
            "competitor extraction finished"
        );

        // Step 3: assemble the prompt and call the model.
        let prompt = build_report_prompt(request, &primary, &competitors);
        tracing::info!(prompt_chars = prompt.len(), "requesting report from model");
        let report = self.llm.generate_report(&prompt).await?;

        // Step 4: health score from the first usable primary listing plus
        // AI-derived counts out of the report itself.
        let listing = primary
            .iter()
            .map(|(_, listing)| listing)
            .find(|listing| !listing.is_empty());
        let inputs = HealthInputs {
            keywords: request.keywords.len(),
            ai_keywords: report.keywords.iter().map(|group| group.terms.len()).sum(),
            competitors: request.competitors.len(),
            ai_competitors: report.competitor_analysis.len(),
        };
        let health = calculate_health_score(listing, inputs);

        Ok(ReportBundle {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            request: request.clone(),
            primary: primary
                .into_iter()
                .map(|(platform, listing)| PlatformListing { platform, listing })
                .collect(),
            competitors,
            report,
            health,
        })
    }

    /// Scrape one listing and ask the model for keyword, competitor, and
    /// market ideas.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the model call fails.
    pub async fn suggest(
        &self,
        url: &str,
        platform: Platform,
    ) -> Result<Suggestions, ReportError> {
        let listing = self.scraper.extract_app_data(url, platform).await;
        let prompt = build_suggest_prompt(&listing);
        self.llm.suggest(&prompt).await
    }

    /// Extract competitor listings in request order, dropping entries whose
    /// pages produced no usable data.
    async fn extract_competitors(&self, request: &ReportRequest) -> Vec<AppListing> {
        let targets: Vec<(usize, String, Platform)> = request
            .competitors
            .iter()
            .enumerate()
            .filter_map(|(index, competitor)| {
                competitor_target(competitor, &request.platforms)
                    .map(|(url, platform)| (index, url.to_string(), platform))
            })
            .collect();

        let mut extracted: Vec<(usize, AppListing)> = stream::iter(targets)
            .map(|(index, url, platform)| {
                let scraper = &self.scraper;
                async move { (index, scraper.extract_app_data(&url, platform).await) }
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        extracted.sort_by_key(|(index, _)| *index);
        extracted
            .into_iter()
            .map(|(_, listing)| listing)
            .filter(|listing| !listing.is_empty())
            .collect()
    }
}

/// Pick the URL to scrape for a competitor: first requested platform with a
/// URL, then either store as a fallback.
fn competitor_target<'a>(
    competitor: &'a CompetitorRef,
    platforms: &[Platform],
) -> Option<(&'a str, Platform)> {
    platforms
        .iter()
        .chain([Platform::Ios, Platform::Android].iter())
        .find_map(|&platform| {
            competitor
                .url_for(platform)
                .map(|url| (url, platform))
        })
}
