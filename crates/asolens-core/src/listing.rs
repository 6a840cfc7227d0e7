use serde::{Deserialize, Serialize};

/// Store platform a listing URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Human-readable store name for prompts and report output.
    #[must_use]
    pub fn store_name(self) -> &'static str {
        match self {
            Platform::Ios => "iOS App Store",
            Platform::Android => "Google Play",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(crate::ConfigError::Validation(format!(
                "unknown platform \"{other}\"; expected ios or android"
            ))),
        }
    }
}

/// Metadata scraped from one store listing page.
///
/// `title` and `description` are always present, empty when nothing matched.
/// Optional fields are absent rather than empty when no pattern matched.
/// [`AppListing::default`] is the all-empty fallback record returned whenever
/// a page cannot be fetched or yields nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppListing {
    #[serde(default)]
    pub title: String,
    /// iOS only; Google Play listings carry no subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Document order, deduplicated, capped by the extractor.
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AppListing {
    /// True when extraction produced nothing usable for this listing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn platform_round_trips_through_str() {
        assert_eq!(Platform::from_str("ios").unwrap(), Platform::Ios);
        assert_eq!(Platform::from_str("Android").unwrap(), Platform::Android);
        assert_eq!(Platform::Ios.to_string(), "ios");
        assert!(Platform::from_str("windows-phone").is_err());
    }

    #[test]
    fn platform_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Platform::Ios).unwrap(), "\"ios\"");
        assert_eq!(
            serde_json::from_str::<Platform>("\"android\"").unwrap(),
            Platform::Android
        );
    }

    #[test]
    fn default_listing_is_the_empty_fallback_record() {
        let listing = AppListing::default();
        assert_eq!(listing.title, "");
        assert_eq!(listing.description, "");
        assert!(listing.screenshots.is_empty());
        assert!(listing.subtitle.is_none());
        assert!(listing.rating.is_none());
        assert!(listing.reviews_count.is_none());
        assert!(listing.icon_url.is_none());
        assert!(listing.developer.is_none());
        assert!(listing.category.is_none());
        assert!(listing.is_empty());
    }

    #[test]
    fn absent_optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(AppListing::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("description"));
        assert!(obj.contains_key("screenshots"));
        assert!(!obj.contains_key("subtitle"));
        assert!(!obj.contains_key("rating"));
        assert!(!obj.contains_key("iconUrl"));
    }

    #[test]
    fn listing_uses_camel_case_wire_names() {
        let listing = AppListing {
            title: "Sample".to_string(),
            reviews_count: Some(12),
            icon_url: Some("https://cdn.example.com/icon.png".to_string()),
            ..AppListing::default()
        };
        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains("\"reviewsCount\":12"));
        assert!(json.contains("\"iconUrl\""));
    }
}
