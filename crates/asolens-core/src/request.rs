use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::listing::Platform;
use crate::ConfigError;

/// Maximum seed keywords accepted per request.
pub const MAX_KEYWORDS: usize = 5;

/// Store listing URLs for the app under analysis, one per platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
}

impl AppUrls {
    #[must_use]
    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        let url = match platform {
            Platform::Ios => self.ios.as_deref(),
            Platform::Android => self.android.as_deref(),
        };
        url.map(str::trim).filter(|u| !u.is_empty())
    }
}

/// A competitor the report should benchmark against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_url: Option<String>,
}

impl CompetitorRef {
    #[must_use]
    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        let url = match platform {
            Platform::Ios => self.ios_url.as_deref(),
            Platform::Android => self.android_url.as_deref(),
        };
        url.map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Everything the user supplies for one report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub app_name: String,
    #[serde(default)]
    pub app_urls: AppUrls,
    pub platforms: Vec<Platform>,
    /// Target market, e.g. "Spain".
    pub country: String,
    /// Report output language, e.g. "Spanish".
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<CompetitorRef>,
}

impl ReportRequest {
    /// Validate the request shape before any network work starts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "appName must be non-empty".to_string(),
            ));
        }
        if self.country.trim().is_empty() {
            return Err(ConfigError::Validation(
                "country must be non-empty".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "language must be non-empty".to_string(),
            ));
        }
        if self.platforms.is_empty() {
            return Err(ConfigError::Validation(
                "at least one platform is required".to_string(),
            ));
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            if self.platforms[..i].contains(platform) {
                return Err(ConfigError::Validation(format!(
                    "duplicate platform: {platform}"
                )));
            }
        }
        if self.keywords.len() > MAX_KEYWORDS {
            return Err(ConfigError::Validation(format!(
                "at most {MAX_KEYWORDS} keywords are allowed, got {}",
                self.keywords.len()
            )));
        }
        Ok(())
    }
}

/// Load and validate a report request from a YAML profile file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_request(path: &Path) -> Result<ReportRequest, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let request: ReportRequest = serde_yaml::from_str(&content)?;
    request.validate()?;

    Ok(request)
}
