//! Ordered fallback chains for each listing field, per platform.
//!
//! Store page markup shifts between redesigns and regional mirrors, so a
//! single fixed pattern per field is brittle. Every field instead carries an
//! ordered list of rules, most-specific first, most-generic last; evaluation
//! stops at the first rule whose capture survives post-processing non-empty.

use regex::Regex;

use asolens_core::Platform;

use crate::text::strip_tags;

/// One member of a field's fallback chain.
pub(crate) struct ExtractRule {
    pub(crate) name: &'static str,
    pub(crate) pattern: Regex,
}

impl ExtractRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
        }
    }

    /// First capture group of the first match, untouched.
    pub(crate) fn capture(&self, html: &str) -> Option<String> {
        self.pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Evaluate a chain for a text field: first rule whose capture is non-empty
/// after tag stripping and trimming wins.
pub(crate) fn first_text(rules: &[ExtractRule], html: &str) -> Option<String> {
    for rule in rules {
        if let Some(raw) = rule.capture(html) {
            let value = strip_tags(&raw);
            if !value.is_empty() {
                tracing::debug!(rule = rule.name, "chain matched");
                return Some(value);
            }
        }
    }
    None
}

/// Evaluate a chain for a URL or numeric field: first rule whose capture is
/// non-empty after trimming wins. No tag stripping.
pub(crate) fn first_raw(rules: &[ExtractRule], html: &str) -> Option<String> {
    for rule in rules {
        if let Some(raw) = rule.capture(html) {
            let value = raw.trim().to_string();
            if !value.is_empty() {
                tracing::debug!(rule = rule.name, "chain matched");
                return Some(value);
            }
        }
    }
    None
}

/// The complete fallback-chain set for one platform.
pub(crate) struct PlatformRules {
    pub(crate) title: Vec<ExtractRule>,
    /// Empty for Android; Google Play has no subtitle concept.
    pub(crate) subtitle: Vec<ExtractRule>,
    pub(crate) description: Vec<ExtractRule>,
    pub(crate) rating: Vec<ExtractRule>,
    pub(crate) reviews: Vec<ExtractRule>,
    pub(crate) icon: Vec<ExtractRule>,
    pub(crate) developer: Vec<ExtractRule>,
    pub(crate) category: Vec<ExtractRule>,
    /// Whole-document screenshot scan; capture group 1 is the image URL.
    pub(crate) screenshots: ExtractRule,
}

impl PlatformRules {
    pub(crate) fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Ios => Self::ios(),
            Platform::Android => Self::android(),
        }
    }

    /// App Store product pages: `product-header` classnames, `we-rating`
    /// badges, embedded JSON-LD, mzstatic CDN imagery.
    fn ios() -> Self {
        Self {
            title: vec![
                ExtractRule::new(
                    "h1.product-header__title",
                    r#"(?s)<h1[^>]*class="[^"]*product-header__title[^"]*"[^>]*>(.*?)</h1>"#,
                ),
                ExtractRule::new(
                    "og:title",
                    r#"<meta\s+property="og:title"\s+content="([^"]+)""#,
                ),
                ExtractRule::new("title tag", r"<title>([^<]+)</title>"),
            ],
            subtitle: vec![
                ExtractRule::new(
                    "h2.product-header__subtitle",
                    r#"(?s)<h2[^>]*class="[^"]*product-header__subtitle[^"]*"[^>]*>(.*?)</h2>"#,
                ),
                ExtractRule::new(
                    "og:description",
                    r#"<meta\s+property="og:description"\s+content="([^"]+)""#,
                ),
            ],
            description: vec![
                ExtractRule::new(
                    "product-review paragraph",
                    r#"(?s)<div[^>]*class="[^"]*product-review[^"]*"[^>]*>.*?<p[^>]*>(.*?)</p>"#,
                ),
                ExtractRule::new(
                    "section__description",
                    r#"(?s)<div[^>]*class="[^"]*section__description[^"]*"[^>]*>(.*?)</div>"#,
                ),
                ExtractRule::new(
                    "meta description",
                    r#"<meta\s+name="description"\s+content="([^"]+)""#,
                ),
            ],
            rating: vec![
                ExtractRule::new("json ratingValue", r#""ratingValue":\s*([\d.]+)"#),
                ExtractRule::new(
                    "we-rating badge",
                    r#"<span[^>]*class="[^"]*we-rating[^"]*"[^>]*>([\d.]+)"#,
                ),
            ],
            reviews: vec![
                ExtractRule::new("json reviewCount", r#""reviewCount":\s*(\d+)"#),
                ExtractRule::new("ratings text", r"(?i)(\d+)\s*ratings"),
            ],
            icon: vec![
                ExtractRule::new(
                    "og:image mzstatic icon",
                    r#"<meta\s+property="og:image"\s+content="([^"]*mzstatic\.com[^"]*icon[^"]*)""#,
                ),
                ExtractRule::new(
                    "product-header__icon img",
                    r#"<img[^>]*class="[^"]*product-header__icon[^"]*"[^>]*src="([^"]+)""#,
                ),
                ExtractRule::new(
                    "apple-itunes-app icon",
                    r#"<meta\s+name="apple-itunes-app"\s+content="[^"]*icon=([^"]+)""#,
                ),
            ],
            developer: vec![
                ExtractRule::new(
                    "developer link",
                    r#"(?s)<a[^>]*class="[^"]*link[^"]*"[^>]*href="[^"]*developer[^"]*"[^>]*>(.*?)</a>"#,
                ),
                ExtractRule::new("json sellerName", r#""sellerName":\s*"([^"]+)""#),
            ],
            category: vec![
                ExtractRule::new(
                    "genre link",
                    r#"(?s)<a[^>]*class="[^"]*link[^"]*"[^>]*href="[^"]*genre[^"]*"[^>]*>(.*?)</a>"#,
                ),
                ExtractRule::new(
                    "json applicationCategory",
                    r#""applicationCategory":\s*"([^"]+)""#,
                ),
            ],
            screenshots: ExtractRule::new(
                "mzstatic img",
                r#"<img[^>]*src="([^"]*mzstatic\.com[^"]*)"[^>]*>"#,
            ),
        }
    }

    /// Google Play listing pages: `itemprop` microdata, `jsname` containers,
    /// googleusercontent CDN imagery.
    fn android() -> Self {
        Self {
            title: vec![
                ExtractRule::new(
                    "h1 itemprop=name",
                    r#"(?s)<h1[^>]*itemprop="name"[^>]*>(.*?)</h1>"#,
                ),
                ExtractRule::new(
                    "og:title",
                    r#"<meta\s+property="og:title"\s+content="([^"]+)""#,
                ),
                ExtractRule::new("title tag", r"<title>([^<]+)</title>"),
            ],
            subtitle: Vec::new(),
            description: vec![
                ExtractRule::new(
                    "jsname description container",
                    r#"(?s)<div[^>]*jsname="[^"]*sngebd[^"]*"[^>]*>(.*?)</div>"#,
                ),
                ExtractRule::new(
                    "itemprop=description div",
                    r#"(?s)<div[^>]*itemprop="description"[^>]*>(.*?)</div>"#,
                ),
                ExtractRule::new(
                    "og:description",
                    r#"<meta\s+property="og:description"\s+content="([^"]+)""#,
                ),
            ],
            rating: vec![
                ExtractRule::new("json ratingValue", r#""ratingValue":\s*([\d.]+)"#),
                ExtractRule::new(
                    "rating badge div",
                    r#"<div[^>]*class="[^"]*BHMmbe[^"]*"[^>]*>([\d.]+)"#,
                ),
            ],
            reviews: vec![
                ExtractRule::new("json reviewCount", r#""reviewCount":\s*(\d+)"#),
                ExtractRule::new("reviews text", r"(?i)(\d+)\s*reviews"),
            ],
            icon: vec![
                ExtractRule::new(
                    "itemprop=image img",
                    r#"<img[^>]*itemprop="image"[^>]*src="([^"]+)"[^>]*>"#,
                ),
                ExtractRule::new(
                    "og:image googleusercontent icon",
                    r#"<meta\s+property="og:image"\s+content="([^"]*googleusercontent\.com[^"]*icon[^"]*)""#,
                ),
                ExtractRule::new(
                    "alt icon img",
                    r#"(?i)<img[^>]*alt="[^"]*icon[^"]*"[^>]*src="([^"]+)""#,
                ),
            ],
            developer: vec![
                ExtractRule::new(
                    "itemprop=author span",
                    r#"(?s)<a[^>]*itemprop="author"[^>]*>.*?<span[^>]*>(.*?)</span>"#,
                ),
                ExtractRule::new("json author", r#""author":\s*"([^"]+)""#),
            ],
            category: vec![
                ExtractRule::new(
                    "itemprop=genre link",
                    r#"(?s)<a[^>]*itemprop="genre"[^>]*>(.*?)</a>"#,
                ),
                ExtractRule::new(
                    "json applicationCategory",
                    r#""applicationCategory":\s*"([^"]+)""#,
                ),
            ],
            screenshots: ExtractRule::new(
                "googleusercontent img",
                r#"<img[^>]*src="([^"]*googleusercontent\.com[^"]*)"[^>]*>"#,
            ),
        }
    }
}
