//! Listing health scoring: four weighted subscores plus their rounded mean.

use serde::{Deserialize, Serialize};

use crate::listing::AppListing;

/// Quality subscores for an app profile, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub metadata_score: u8,
    pub keyword_coverage_score: u8,
    pub competitor_strength_score: u8,
    pub visual_assets_score: u8,
    pub overall_score: u8,
}

/// Counts feeding the score beyond the listing itself.
///
/// `ai_keywords` / `ai_competitors` count AI-produced terms and competitor
/// entries, from auto-suggest output or a generated report; zero when
/// neither has run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthInputs {
    pub keywords: usize,
    pub ai_keywords: usize,
    pub competitors: usize,
    pub ai_competitors: usize,
}

/// Compute the health score for a profile.
///
/// `listing` is the primary extracted listing when one exists; metadata and
/// visual subscores are zero without it.
#[must_use]
pub fn calculate_health_score(listing: Option<&AppListing>, inputs: HealthInputs) -> HealthScore {
    let mut metadata: u8 = 0;
    let mut visual: u8 = 0;

    if let Some(listing) = listing {
        if listing.subtitle.is_some() {
            metadata += 20;
        }
        if !listing.description.is_empty() {
            metadata += 20;
        }
        if listing.icon_url.is_some() {
            metadata += 20;
        }
        if listing.rating.is_some() {
            metadata += 20;
        }
        if listing.screenshots.len() >= 3 {
            metadata += 20;
        }

        if listing.icon_url.is_some() {
            visual += 30;
        }
        if !listing.screenshots.is_empty() {
            visual += 20;
        }
        if listing.screenshots.len() >= 3 {
            visual += 25;
        }
        if listing.screenshots.len() >= 5 {
            visual += 25;
        }
    }

    let mut keyword: u8 = 0;
    if inputs.keywords >= 1 {
        keyword += 20;
    }
    if inputs.keywords >= 3 {
        keyword += 20;
    }
    if inputs.keywords >= 5 {
        keyword += 20;
    }
    if inputs.ai_keywords > 0 {
        keyword += 20;
    }
    if inputs.ai_keywords >= 10 {
        keyword += 20;
    }

    let mut competitor: u8 = 0;
    if inputs.competitors >= 1 {
        competitor += 25;
    }
    if inputs.competitors >= 3 {
        competitor += 25;
    }
    if inputs.ai_competitors > 0 {
        competitor += 25;
    }
    if inputs.competitors >= 5 {
        competitor += 25;
    }

    let sum = u32::from(metadata) + u32::from(keyword) + u32::from(competitor) + u32::from(visual);
    // Round half up, matching the rendered score users saw historically.
    let overall = u8::try_from((sum + 2) / 4).unwrap_or(100);

    HealthScore {
        metadata_score: metadata,
        keyword_coverage_score: keyword,
        competitor_strength_score: competitor,
        visual_assets_score: visual,
        overall_score: overall,
    }
}
