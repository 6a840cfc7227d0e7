//! Subcommand handlers, called from `main` after config and tracing are set
//! up. Handlers print their results to stdout; progress goes to tracing.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use asolens_core::{load_request, AppConfig, Platform, ReportRequest};
use asolens_report::{check_api_status, enrich_report, KeyStatus, PexelsClient, ReportPipeline};
use asolens_scraper::StoreScraper;

/// Extract one listing and print it as pretty JSON.
pub async fn extract(config: &AppConfig, url: &str, platform: Platform) -> anyhow::Result<()> {
    let scraper = StoreScraper::new(Duration::from_secs(config.fetch_timeout_secs))?;
    let listing = scraper.extract_app_data(url, platform).await;
    if listing.is_empty() {
        tracing::warn!(url, "no listing data could be extracted");
    }
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

/// Run the full report pipeline for a profile, optionally enriching images.
pub async fn report(
    config: &AppConfig,
    profile: &Path,
    output: Option<&Path>,
    enrich: bool,
) -> anyhow::Result<()> {
    let request = load_profile(profile)?;
    let pipeline = ReportPipeline::from_config(config)?;
    let mut bundle = pipeline.run(&request).await?;

    if enrich {
        match config.pexels_api_key.as_deref() {
            Some(key) => {
                let client = PexelsClient::with_base_url(key, &config.pexels_base_url)?;
                let applied = enrich_report(
                    &mut bundle.report,
                    &request.country,
                    &client,
                    Duration::from_millis(config.enrich_delay_ms),
                )
                .await;
                tracing::info!(applied, "enrichment added images");
            }
            None => tracing::warn!("PEXELS_API_KEY not set, skipping enrichment"),
        }
    }

    let rendered = serde_json::to_string_pretty(&bundle)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), report_id = %bundle.id, "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Ask the model for keyword/competitor/market ideas for a profile's app.
pub async fn suggest(config: &AppConfig, profile: &Path) -> anyhow::Result<()> {
    let request = load_profile(profile)?;
    let (url, platform) = suggest_target(&request)
        .ok_or_else(|| anyhow::anyhow!("profile has no app URL for any requested platform"))?;

    let pipeline = ReportPipeline::from_config(config)?;
    let suggestions = pipeline.suggest(&url, platform).await?;
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}

/// Probe configured API keys and print one line per service.
pub async fn status(config: &AppConfig) -> anyhow::Result<()> {
    let report = check_api_status(config).await;
    print_key_status("OpenAI", &report.openai);
    print_key_status("Pexels", &report.pexels);
    Ok(())
}

fn load_profile(path: &Path) -> anyhow::Result<ReportRequest> {
    load_request(path).with_context(|| format!("failed to load profile {}", path.display()))
}

/// First requested platform that has an app URL in the profile.
pub(crate) fn suggest_target(request: &ReportRequest) -> Option<(String, Platform)> {
    request.platforms.iter().find_map(|&platform| {
        request
            .app_urls
            .url_for(platform)
            .map(|url| (url.to_string(), platform))
    })
}

fn print_key_status(name: &str, status: &KeyStatus) {
    if !status.configured {
        println!("{name}: not configured");
    } else if status.valid {
        println!("{name}: ok - {}", status.detail);
    } else {
        println!("{name}: error - {}", status.detail);
    }
}
