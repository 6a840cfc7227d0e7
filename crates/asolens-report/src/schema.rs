//! Structured report and suggestion types.
//!
//! These model the JSON document the model is instructed to produce. Every
//! struct takes `#[serde(default)]` so a report with missing optional
//! sections still deserializes; the wire format is camelCase throughout.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The full generated report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AsoReport {
    pub hypothesis: Vec<Hypothesis>,
    pub cultural_insights: CulturalInsights,
    pub competitor_analysis: Vec<CompetitorAnalysis>,
    pub recommendations: Vec<Recommendation>,
    pub keywords: Vec<KeywordGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_color_palette: Option<Palette>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_visual_assets: Option<AppVisualAssets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshot_proposals: Vec<ScreenshotProposal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub message_clusters: Vec<MessageCluster>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_terminology: Vec<LocalTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cultural_elements: Vec<CulturalElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub competitor_insights: Vec<CompetitorInsight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub benchmark_comparisons: Vec<BenchmarkComparison>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub experiment_roadmap: Vec<Experiment>,
}

/// An A/B testing hypothesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hypothesis {
    pub title: String,
    pub description: String,
    pub expected_outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_example: Option<String>,
}

/// Market and culture insights for the target country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CulturalInsights {
    pub urban_mobility: String,
    pub regulations: String,
    pub lifestyle: String,
    pub language: String,
    pub seasonality: String,
    pub regional_focus: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_data: Vec<LocalFact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_market_details: Option<LocalMarketDetails>,
}

/// A concrete local fact with a citation; enrichment fills the image fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalFact {
    pub fact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub relevance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pexels_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pexels_image_description: Option<String>,
}

/// Ultra-specific market details: currency, cities, language forms, laws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalMarketDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_format: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_cities: Vec<CityDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_characteristics: Option<LanguageCharacteristics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_objects: Vec<LocalObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legal_specifics: Vec<LegalReference>,
}

/// One target-market city with the places worth showing in creatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CityDetails {
    pub name: String,
    pub characteristics: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub famous_streets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_objects: Vec<String>,
}

/// Address forms and phrasing conventions for the market language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageCharacteristics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formal_forms: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub informal_forms: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub common_phrases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_preferences: Option<String>,
}

/// A culturally significant local object to feature in creatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalObject {
    pub name: String,
    pub description: String,
    pub cultural_significance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_reference: Option<String>,
}

/// A named local law or regulation with its affected zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegalReference {
    pub law_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub law_number: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Per-competitor analysis backed by scraped listing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    pub name: String,
    pub value_prop: String,
    pub visual_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub comparison: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Palette>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
}

/// An actionable creative/copy recommendation.
///
/// `pexels_query_suggestion` is the model's own image-search hint; the
/// enrichment pass prefers it over heuristics when filling
/// `pexels_image_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub insight: String,
    pub visual_elements: Vec<String>,
    pub copy_suggestions: Vec<String>,
    pub local_elements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Palette>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_data: Vec<LocalFact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_proposal: Option<ScreenshotProposal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_terminology: Vec<LocalTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cultural_elements: Vec<CulturalElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_streets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_landmarks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub autochthonous_objects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pexels_query_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pexels_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pexels_image_description: Option<String>,
}

/// A keyword category with its terms and competition estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeywordGroup {
    pub category: String,
    pub terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_variations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Visual assets, palettes, screenshot proposals
// ---------------------------------------------------------------------------

/// A named color palette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub name: String,
    pub colors: Vec<PaletteColor>,
    pub description: String,
}

/// One palette entry: `rgb(..)` string, hex code, and where it is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteColor {
    pub rgb: String,
    pub hex: String,
    pub usage: String,
}

/// Icon and screenshot URLs collected for the app itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppVisualAssets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
}

/// Background treatment for a proposed screenshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundType {
    RealPhoto,
    Illustration,
    #[default]
    UiOnly,
    Hybrid,
}

/// A fully specified store-screenshot proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenshotProposal {
    /// Position in the screenshot lineup: S1, S2, …
    pub number: u32,
    /// "hero", "functional", "social_proof", …
    pub role: String,
    pub business_objective: String,
    pub visual_content: VisualContent,
    pub ui_content: UiContent,
    pub copy: ScreenshotCopy,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ab_test_variants: Vec<AbTestVariant>,
}

/// The scene a proposed screenshot should show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualContent {
    pub background_type: BackgroundType,
    pub local_scene_description: String,
    pub mandatory_elements: Vec<String>,
    pub local_objects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_streets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_landmarks: Vec<String>,
}

/// The product UI state a proposed screenshot should capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiContent {
    pub view_name: String,
    pub visible_fields: Vec<String>,
    pub state: String,
}

/// Copy for a proposed screenshot, in the market language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenshotCopy {
    pub headline: String,
    pub subheadline: String,
    pub message_cluster: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_phrases: Vec<String>,
}

/// One A/B variant of a proposed screenshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbTestVariant {
    pub variant_id: String,
    pub changes: String,
    pub kpi_objective: String,
}

// ---------------------------------------------------------------------------
// Messaging, terminology, culture
// ---------------------------------------------------------------------------

/// A message cluster with example copy and when to use it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageCluster {
    pub name: String,
    pub examples: Vec<CopyExample>,
    pub keywords: Vec<String>,
    pub use_cases: Vec<String>,
}

/// A headline/subheadline pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CopyExample {
    pub headline: String,
    pub subheadline: String,
}

/// An autochthonous term worth using in store copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalTerm {
    pub term: String,
    pub meaning: String,
    pub context: String,
    pub aso_relevance: String,
}

/// Classification of a cultural element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CulturalElementKind {
    #[default]
    Tradition,
    Event,
    Lifestyle,
    Visual,
    Language,
}

/// A tradition, event, or visual motif to incorporate into creatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CulturalElement {
    #[serde(rename = "type")]
    pub kind: CulturalElementKind,
    pub name: String,
    pub description: String,
    pub specific_details: String,
    pub aso_application: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub visual_references: Vec<String>,
}

// ---------------------------------------------------------------------------
// Competitor insights, benchmarks, experiments
// ---------------------------------------------------------------------------

/// Screenshot-by-screenshot competitor breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorInsight {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    pub value_proposition: String,
    pub key_messages: Vec<String>,
    pub screenshots: Vec<ScreenshotMessage>,
    /// What the competitor does not cover.
    pub gaps: Vec<String>,
    pub opportunities: Vec<String>,
}

/// The message one competitor screenshot carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenshotMessage {
    pub number: u32,
    pub message: String,
    pub visual_elements: Vec<String>,
}

/// What a benchmark comparison compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkKind {
    #[default]
    Icons,
    Screenshots,
    Colors,
    Copy,
}

/// A side-by-side visual comparison between the app and its competitors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BenchmarkComparison {
    #[serde(rename = "type")]
    pub kind: BenchmarkKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_assets: Option<AppVisualAssets>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub competitor_assets: Vec<CompetitorAssets>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pexels_image_url: Option<String>,
}

/// Competitor-side assets in a benchmark comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorAssets {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Palette>,
}

/// One experiment in the testing roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experiment {
    pub name: String,
    pub hypothesis: String,
    pub variants: Vec<String>,
    pub kpi: String,
    pub duration: String,
    pub expected_sample_size: String,
}

// ---------------------------------------------------------------------------
// Suggestions (auto-suggest operation)
// ---------------------------------------------------------------------------

/// Keyword, competitor, and market ideas generated from one listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Suggestions {
    pub keywords: Vec<KeywordIdea>,
    pub competitors: Vec<CompetitorIdea>,
    pub markets: Vec<MarketIdea>,
    pub recommendations: String,
}

/// A suggested keyword with intent and competition estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeywordIdea {
    pub keyword: String,
    pub intent: String,
    pub search_volume: String,
    pub competition: String,
}

/// A suggested competitor and why it is relevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorIdea {
    pub name: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A market worth expanding into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketIdea {
    pub country: String,
    pub language: String,
    pub opportunity: String,
}
