//! Prompt construction for report generation and auto-suggest.
//!
//! Pure string builders: network-free, deterministic, and unit-tested in
//! isolation from the model client. Absent listing fields render as
//! `"Not available"` so the model never sees empty slots it might invent
//! values for.

use asolens_core::{AppListing, Platform, ReportRequest};

use crate::niche::{detect_niche, niche_context};

/// Placeholder for listing fields no extraction rule matched.
pub const NOT_AVAILABLE: &str = "Not available";

/// Description length cap for the primary app inside the prompt.
const PRIMARY_DESCRIPTION_CHARS: usize = 500;
/// Description length cap for competitors inside the prompt.
const COMPETITOR_DESCRIPTION_CHARS: usize = 300;

/// Build the full report-generation prompt.
///
/// `primary` holds one extracted listing per requested platform (in request
/// order); `competitors` holds only competitor listings that extracted a
/// title.
#[must_use]
pub fn build_report_prompt(
    request: &ReportRequest,
    primary: &[(Platform, AppListing)],
    competitors: &[AppListing],
) -> String {
    let category = request.category.as_deref().unwrap_or("general");

    let title = primary
        .iter()
        .map(|(_, listing)| listing.title.as_str())
        .find(|t| !t.is_empty())
        .unwrap_or(&request.app_name);
    let description = primary
        .iter()
        .map(|(_, listing)| listing.description.as_str())
        .find(|d| !d.is_empty())
        .unwrap_or("");
    let niche = detect_niche(title, description, category);
    let context = niche_context(niche, category);

    let platforms = request
        .platforms
        .iter()
        .map(|p| p.store_name())
        .collect::<Vec<_>>()
        .join(" and ");

    let app_data = primary
        .iter()
        .map(|(platform, listing)| primary_section(request, *platform, listing))
        .collect::<String>();

    let assets = assets_section(request, primary);
    let competitor_data = competitor_section(competitors);

    let keywords = if request.keywords.is_empty() {
        "Automatically identify the best local keywords based on the category, niche, and market."
            .to_string()
    } else {
        request.keywords.join(", ")
    };

    let mut urls = String::new();
    if let Some(url) = request.app_urls.url_for(Platform::Ios) {
        urls.push_str(&format!("- iOS: {url}\n"));
    }
    if let Some(url) = request.app_urls.url_for(Platform::Android) {
        urls.push_str(&format!("- Android: {url}\n"));
    }

    format!(
        "You are a SENIOR ASO (App Store Optimization) consultant with 15+ years of experience \
         generating ULTRA-DETAILED, PROFESSIONAL strategic reports to maximize the conversion \
         rate of the app \"{app_name}\" on {platforms} in the {country} market.\n\
         \n\
         **REPORT LANGUAGE:** English (the entire report must be written in English).\n\
         \n\
         **NICHE DETECTION:**\n{context}\n\
         \n\
         **CRITICAL INSTRUCTION:** ALL sections (cultural context, cities, language, local \
         objects) MUST be adapted to the app's niche ({niche}). Do NOT use generic examples.\n\
         \n\
         ## ACTUAL APP DATA:\n\n{app_data}\
         ## APP VISUAL ASSETS:\n\n{assets}\n\
         ## COMPETITOR DATA:\n\n{competitor_data}\n\
         **TARGET KEYWORDS:** {keywords}\n\
         \n\
         **APP URLS:**\n{urls}\
         \n{instructions}",
        app_name = request.app_name,
        country = request.country,
        instructions = instructions_section(request, niche.as_str()),
    )
}

fn primary_section(request: &ReportRequest, platform: Platform, listing: &AppListing) -> String {
    let mut section = format!("**{}:**\n", platform.store_name());
    let title = if listing.title.is_empty() {
        &request.app_name
    } else {
        &listing.title
    };
    section.push_str(&format!("- Title: {title}\n"));
    if platform == Platform::Ios {
        if let Some(subtitle) = listing.subtitle.as_deref() {
            section.push_str(&format!("- Subtitle: {subtitle}\n"));
        }
    }
    section.push_str(&format!(
        "- Description: {}\n",
        clipped_description(&listing.description, PRIMARY_DESCRIPTION_CHARS)
    ));
    section.push_str(&format!("- Rating: {}\n", rating_line(listing)));
    section.push_str(&format!(
        "- Developer: {}\n",
        or_not_available(listing.developer.as_deref())
    ));
    let category = listing
        .category
        .as_deref()
        .or_else(|| request.category.as_deref());
    section.push_str(&format!("- Category: {}\n", or_not_available(category)));
    section.push_str(&format!(
        "- Icon: {}\n",
        or_not_available(listing.icon_url.as_deref())
    ));
    section.push_str(&format!(
        "- Screenshots: {} images provided\n{}\n",
        listing.screenshots.len(),
        numbered_urls(&listing.screenshots)
    ));
    section
}

fn assets_section(request: &ReportRequest, primary: &[(Platform, AppListing)]) -> String {
    let icon = primary
        .iter()
        .find_map(|(_, listing)| listing.icon_url.as_deref());
    let screenshots: Vec<String> = primary
        .iter()
        .flat_map(|(_, listing)| listing.screenshots.iter().cloned())
        .collect();
    let platforms = request
        .platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "- Icon: {}\n- Screenshots: {} images provided\n- Platforms: {platforms}\n{}\n",
        or_not_available(icon),
        screenshots.len(),
        numbered_urls(&screenshots)
    )
}

fn competitor_section(competitors: &[AppListing]) -> String {
    if competitors.is_empty() {
        return "No competitors provided. Identify the main local competitors automatically.\n"
            .to_string();
    }

    competitors
        .iter()
        .enumerate()
        .map(|(idx, comp)| {
            format!(
                "**Competitor {n}:**\n\
                 - Title: {title}\n\
                 - Description: {description}\n\
                 - Rating: {rating}\n\
                 - Category: {category}\n\
                 - Icon: {icon}\n\
                 - Screenshots: {count} images provided\n{urls}\n\
                 Use this REAL extracted data in the competitor analysis; compare icons, \
                 screenshots, and color palettes against the app's real assets.\n\n",
                n = idx + 1,
                title = comp.title,
                description = clipped_description(&comp.description, COMPETITOR_DESCRIPTION_CHARS),
                rating = rating_line(comp),
                category = or_not_available(comp.category.as_deref()),
                icon = or_not_available(comp.icon_url.as_deref()),
                count = comp.screenshots.len(),
                urls = numbered_urls(&comp.screenshots),
            )
        })
        .collect()
}

fn instructions_section(request: &ReportRequest, niche: &str) -> String {
    format!(
        "**INSTRUCTIONS:**\n\
         1. USE THE REAL EXTRACTED DATA above. Do NOT invent data; when a value is marked \
            \"{NOT_AVAILABLE}\", say so rather than fabricating one.\n\
         2. Analyze every screenshot URL provided to extract REAL color palettes (5-8 colors \
            with RGB and HEX values and where each is used), for the app and each competitor.\n\
         3. Provide ULTRA-SPECIFIC local data for the {country} market adapted to the {niche} \
            niche: concrete facts with sources and links, exact law/regulation names, real \
            street and landmark names per city, autochthonous objects, currency and price \
            format, and formal/informal address forms in {language}.\n\
         4. Generate at least 6 detailed screenshot proposals (S1, S2, ...), each with role, \
            business objective, a local scene description naming REAL places, mandatory \
            elements, UI view and state, headline/subheadline copy in {language}, and A/B \
            variants with their KPI.\n\
         5. Create message clusters for the market, each with at least 3 headline/subheadline \
            examples, related keywords, and use cases.\n\
         6. For each competitor: value proposition, per-screenshot key messages, gaps, and \
            opportunities to differentiate.\n\
         7. Build an experiment roadmap: name, hypothesis, variants, KPI, duration, and \
            expected sample size per experiment.\n\
         8. Include at least 2 benchmark comparisons (type one of: icons, screenshots, colors, \
            copy) with insights and recommendations.\n\
         9. Generate at least 50 keywords across categories (primary, long-tail, \
            location-based, niche-specific) with search volume, competition, and local \
            variations in {language}.\n\
         10. For every recommendation with a visual element, set pexelsQuerySuggestion to a \
             specific niche- and place-aware image query (for example \"zona azul madrid \
             parking sign\"); leave pexelsImageUrl empty for the system to fill afterwards.\n\
         \n\
         **OUTPUT FORMAT:** Respond with a single JSON object, no markdown fences, using \
         camelCase keys with this top-level structure:\n\
         - hypothesis: array of {{title, description, expectedOutcome, screenshotUrl?, \
           visualExample?}}\n\
         - culturalInsights: {{urbanMobility, regulations, lifestyle, language, seasonality, \
           regionalFocus, localData: [{{fact, source?, link?, relevance, \
           pexelsImageDescription?}}], localMarketDetails?}}\n\
         - competitorAnalysis: array of {{name, valueProp, visualPatterns, keywords, \
           comparison, screenshots?, iconUrl?, colorPalette?, rating?, reviewsCount?}}\n\
         - recommendations: array of {{title, insight, visualElements, copySuggestions, \
           localElements, implementationDetails?, screenshotProposal?, localData?, \
           specificStreets?, specificLandmarks?, autochthonousObjects?, \
           pexelsQuerySuggestion?}}\n\
         - keywords: array of {{category, terms, searchVolume?, competition?, \
           localVariations?}}\n\
         - appColorPalette?, appVisualAssets?, visualSummary?\n\
         - screenshotProposals: array of {{number, role, businessObjective, visualContent: \
           {{backgroundType: real_photo|illustration|ui_only|hybrid, localSceneDescription, \
           mandatoryElements, localObjects, localStreets?, localLandmarks?}}, uiContent: \
           {{viewName, visibleFields, state}}, copy: {{headline, subheadline, messageCluster, \
           localPhrases?}}, abTestVariants?}}\n\
         - messageClusters, localTerminology, culturalElements (type one of: tradition, \
           event, lifestyle, visual, language), competitorInsights, benchmarkComparisons \
           (type one of: icons, screenshots, colors, copy), experimentRoadmap\n",
        country = request.country,
        language = request.language,
    )
}

/// Build the auto-suggest prompt from one extracted listing.
#[must_use]
pub fn build_suggest_prompt(listing: &AppListing) -> String {
    format!(
        "You are an ASO (App Store Optimization) expert. Analyze the following app data and \
         provide intelligent suggestions.\n\
         \n\
         **APP DATA:**\n\
         - Name: {name}\n\
         - Category: {category}\n\
         - Description: {description}\n\
         - Developer: {developer}\n\
         - Rating: {rating}\n\
         - Reviews: {reviews}\n\
         \n\
         **TASK:**\n\
         1. KEYWORDS (minimum 15-20): primary, long-tail, category-specific, and competitor \
            combinations; for each give keyword, intent (informational, transactional, \
            navigational), searchVolume (High/Medium/Low), and competition (High/Medium/Low).\n\
         2. COMPETITORS (minimum 5-10): direct and indirect; for each give name, reason, and \
            an optional likely store url.\n\
         3. MARKETS (minimum 3-5): countries with growth potential; for each give country, \
            language, and opportunity.\n\
         4. RECOMMENDATIONS: overall ASO strategy notes as a single string.\n\
         \n\
         **OUTPUT FORMAT (JSON):**\n\
         {{\n\
           \"keywords\": [{{\"keyword\": \"...\", \"intent\": \"transactional\", \
         \"searchVolume\": \"High\", \"competition\": \"Medium\"}}],\n\
           \"competitors\": [{{\"name\": \"...\", \"reason\": \"...\", \"url\": \"...\"}}],\n\
           \"markets\": [{{\"country\": \"...\", \"language\": \"...\", \"opportunity\": \
         \"...\"}}],\n\
           \"recommendations\": \"...\"\n\
         }}\n\
         \n\
         All suggestions must be relevant to the app's category and features, realistic, and \
         actionable.",
        name = or_not_provided(Some(listing.title.as_str())),
        category = or_not_provided(listing.category.as_deref()),
        description = or_not_provided(Some(listing.description.as_str())),
        developer = or_not_provided(listing.developer.as_deref()),
        rating = listing
            .rating
            .map_or_else(|| "Not provided".to_string(), |r| r.to_string()),
        reviews = listing
            .reviews_count
            .map_or_else(|| "Not provided".to_string(), |n| n.to_string()),
    )
}

fn or_not_available(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

fn or_not_provided(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("Not provided")
}

fn rating_line(listing: &AppListing) -> String {
    match listing.rating {
        None => NOT_AVAILABLE.to_string(),
        Some(rating) => match listing.reviews_count {
            Some(reviews) => format!("{rating}/5 ({reviews} reviews)"),
            None => format!("{rating}/5"),
        },
    }
}

/// First `max` chars plus a marker, or the placeholder when empty.
fn clipped_description(description: &str, max: usize) -> String {
    if description.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match description.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &description[..idx]),
        None => format!("{description}..."),
    }
}

fn numbered_urls(urls: &[String]) -> String {
    urls.iter()
        .enumerate()
        .map(|(i, url)| format!("  {}. {url}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
