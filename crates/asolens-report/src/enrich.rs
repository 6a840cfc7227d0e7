//! Report enrichment: fills empty image slots with stock photos.
//!
//! Walks a generated report in a fixed order (cultural facts, then
//! recommendations, then benchmark comparisons) and looks up one image per
//! empty slot. Slots that already carry a URL are left alone, so re-running
//! enrichment is idempotent. Lookups are spaced by a configurable delay to
//! stay under the Pexels free-tier rate limit.

use std::time::Duration;

use regex::Regex;

use crate::pexels::{build_image_query, FoundImage, ImageSearch};
use crate::schema::AsoReport;

/// Fill missing image slots in `report`, returning how many images were
/// applied. Consecutive lookups are separated by `delay`.
pub async fn enrich_report<S>(
    report: &mut AsoReport,
    country: &str,
    search: &S,
    delay: Duration,
) -> usize
where
    S: ImageSearch + ?Sized,
{
    let patterns = PlacePatterns::new();
    let mut walker = Walker {
        search,
        country,
        delay,
        lookups: 0,
        applied: 0,
    };

    // Cultural facts: query built from the fact text plus its relevance note.
    for fact in &mut report.cultural_insights.local_data {
        if missing(&fact.pexels_image_url) {
            let query = build_image_query(&fact.fact, country, Some(&fact.relevance));
            if let Some(image) = walker.lookup(&query).await {
                fact.pexels_image_url = Some(image.url);
                fact.pexels_image_description = Some(image.description);
                walker.applied += 1;
            }
        }
    }

    // Recommendations: a model-suggested query wins outright; otherwise scan
    // the text for named places and zone types.
    for rec in &mut report.recommendations {
        if missing(&rec.pexels_image_url) {
            let suggestion = rec.pexels_query_suggestion.clone().filter(|q| !q.is_empty());
            if let Some(query) = suggestion {
                if let Some(image) = walker.lookup(&query).await {
                    rec.pexels_image_url = Some(image.url);
                    rec.pexels_image_description = Some(image.description);
                    walker.applied += 1;
                    continue;
                }
            }
        }

        if missing(&rec.pexels_image_url) {
            let haystack = format!(
                "{} {} {}",
                rec.title,
                rec.insight,
                rec.local_elements.join(" ")
            )
            .to_lowercase();

            if let Some(place) = patterns.named_place(&haystack) {
                let query = format!("{place} {country} parking");
                if let Some(image) = walker.lookup(&query).await {
                    rec.pexels_image_url = Some(image.url);
                    rec.pexels_image_description = Some(image.description);
                    walker.applied += 1;
                }
            }

            if missing(&rec.pexels_image_url) {
                if let Some(zone) = patterns.zone_type(&haystack) {
                    let query = format!("{zone} {country} parking sign");
                    if let Some(image) = walker.lookup(&query).await {
                        rec.pexels_image_url = Some(image.url);
                        rec.pexels_image_description = Some(image.description);
                        walker.applied += 1;
                    }
                }
            }
        }

        // Facts attached to the recommendation carry their own slots.
        let title = rec.title.clone();
        for fact in &mut rec.local_data {
            if missing(&fact.pexels_image_url) {
                let fact_text = fact.fact.to_lowercase();
                let query = if let Some(place) = patterns.fact_place(&fact_text) {
                    format!("{place} {country} parking")
                } else if let Some(zone) = patterns.fact_zone(&fact_text) {
                    format!("{zone} {country} parking sign")
                } else {
                    build_image_query(&fact.fact, country, Some(&title))
                };
                if let Some(image) = walker.lookup(&query).await {
                    fact.pexels_image_url = Some(image.url);
                    fact.pexels_image_description = Some(image.description);
                    walker.applied += 1;
                }
            }
        }
    }

    // Benchmark comparisons: only street references in the description are
    // illustrated, and only the URL slot is filled.
    for benchmark in &mut report.benchmark_comparisons {
        if missing(&benchmark.pexels_image_url) && !benchmark.description.is_empty() {
            if let Some(street) = patterns.street_reference(&benchmark.description) {
                let query = format!("{street} {country}");
                if let Some(image) = walker.lookup(&query).await {
                    benchmark.pexels_image_url = Some(image.url);
                    walker.applied += 1;
                }
            }
        }
    }

    tracing::info!(
        applied = walker.applied,
        lookups = walker.lookups,
        "report enrichment finished"
    );
    walker.applied
}

fn missing(slot: &Option<String>) -> bool {
    slot.as_deref().is_none_or(str::is_empty)
}

struct Walker<'a, S: ?Sized> {
    search: &'a S,
    country: &'a str,
    delay: Duration,
    lookups: usize,
    applied: usize,
}

impl<S: ImageSearch + ?Sized> Walker<'_, S> {
    async fn lookup(&mut self, query: &str) -> Option<FoundImage> {
        if self.lookups > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.lookups += 1;
        tracing::debug!(query, country = self.country, "image lookup");
        self.search.search(query).await
    }
}

/// Compiled patterns for spotting Mediterranean street names, landmarks, and
/// regulated-parking zone types in report text.
struct PlacePatterns {
    named_places: Vec<Regex>,
    zone_types: Vec<Regex>,
    fact_place: Regex,
    fact_zone: Regex,
    street_reference: Regex,
}

impl PlacePatterns {
    fn new() -> Self {
        let named_places = [
            r"plaza\s+[a-záéíóúàèìòùñç]+",
            r"piazza\s+[a-záéíóúàèìòùñç]+",
            r"calle\s+[a-záéíóúàèìòùñç]+",
            r"carrer\s+[a-záéíóúàèìòùñç]+",
            r"via\s+[a-záéíóúàèìòùñç]+",
            r"zona\s+(?:azul|blava|blu|ztl|residenti)",
            r"sagrada\s+família|colosseo|duomo|plaza\s+mayor|gran\s+vía|passeig\s+de\s+gràcia",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect();

        let zone_types = [
            r"zona\s+azul",
            r"zona\s+blava",
            r"zona\s+blu",
            r"ztl",
            r"zona\s+residenti",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect();

        Self {
            named_places,
            zone_types,
            fact_place: Regex::new(
                r"plaza|piazza|calle|carrer|via|gran\s+vía|passeig|sagrada|colosseo|duomo|plaza\s+mayor|plaza\s+catalunya",
            )
            .expect("valid regex"),
            fact_zone: Regex::new(r"zona\s+azul|zona\s+blava|zona\s+blu|ztl")
                .expect("valid regex"),
            // Benchmark descriptions keep their original casing.
            street_reference: Regex::new(
                r"(?i)(?:plaza|piazza|via|street|avenue|boulevard)\s+[a-záéíóúàèìòù]+",
            )
            .expect("valid regex"),
        }
    }

    /// First named place or landmark in lowercased recommendation text.
    fn named_place<'t>(&self, text: &'t str) -> Option<&'t str> {
        first_match(&self.named_places, text)
    }

    /// First zone type (zona azul, ZTL, ...) in lowercased recommendation text.
    fn zone_type<'t>(&self, text: &'t str) -> Option<&'t str> {
        first_match(&self.zone_types, text)
    }

    fn fact_place<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.fact_place.find(text).map(|m| m.as_str())
    }

    fn fact_zone<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.fact_zone.find(text).map(|m| m.as_str())
    }

    fn street_reference<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.street_reference.find(text).map(|m| m.as_str())
    }
}

fn first_match<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::schema::{BenchmarkComparison, CulturalInsights, LocalFact, Recommendation};

    /// Records queries and answers with a canned image, except for queries
    /// listed in `misses`.
    #[derive(Default)]
    struct FakeSearch {
        log: Mutex<Vec<String>>,
        misses: HashSet<String>,
    }

    impl FakeSearch {
        fn missing(queries: &[&str]) -> Self {
            Self {
                log: Mutex::new(Vec::new()),
                misses: queries.iter().map(|q| (*q).to_string()).collect(),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageSearch for FakeSearch {
        async fn search(&self, query: &str) -> Option<FoundImage> {
            self.log.lock().unwrap().push(query.to_string());
            if self.misses.contains(query) {
                return None;
            }
            Some(FoundImage {
                url: format!("https://images.test/{}.jpg", query.replace(' ', "-")),
                description: format!("Photo by Test: {query}"),
            })
        }
    }

    fn fact(text: &str, relevance: &str) -> LocalFact {
        LocalFact {
            fact: text.to_string(),
            relevance: relevance.to_string(),
            ..LocalFact::default()
        }
    }

    #[tokio::test]
    async fn fills_cultural_facts_and_skips_existing() {
        let mut report = AsoReport {
            cultural_insights: CulturalInsights {
                local_data: vec![
                    LocalFact {
                        pexels_image_url: Some("https://images.test/already.jpg".to_string()),
                        ..fact("Madrid regulates street parking", "urban pressure")
                    },
                    fact("Drivers circle blocks searching spots", "pain point"),
                ],
                ..CulturalInsights::default()
            },
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        let applied = enrich_report(&mut report, "Spain", &search, Duration::ZERO).await;

        assert_eq!(applied, 1);
        assert_eq!(search.queries(), vec!["drivers circle blocks Spain pain"]);
        let untouched = &report.cultural_insights.local_data[0];
        assert_eq!(
            untouched.pexels_image_url.as_deref(),
            Some("https://images.test/already.jpg")
        );
        let filled = &report.cultural_insights.local_data[1];
        assert!(filled.pexels_image_url.is_some());
        assert!(filled
            .pexels_image_description
            .as_deref()
            .unwrap()
            .starts_with("Photo by Test:"));
    }

    #[tokio::test]
    async fn suggestion_hit_skips_other_lookups_for_that_recommendation() {
        let mut report = AsoReport {
            recommendations: vec![Recommendation {
                title: "Show Plaza Catalunya coverage".to_string(),
                pexels_query_suggestion: Some("barcelona parking meter".to_string()),
                local_data: vec![fact("Zona blava covers the Eixample", "zone info")],
                ..Recommendation::default()
            }],
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        let applied = enrich_report(&mut report, "Spain", &search, Duration::ZERO).await;

        assert_eq!(applied, 1);
        assert_eq!(search.queries(), vec!["barcelona parking meter"]);
        assert!(report.recommendations[0].pexels_image_url.is_some());
        // The attached fact is skipped entirely on a suggestion hit.
        assert!(report.recommendations[0].local_data[0]
            .pexels_image_url
            .is_none());
    }

    #[tokio::test]
    async fn suggestion_miss_falls_back_to_place_patterns() {
        let mut report = AsoReport {
            recommendations: vec![Recommendation {
                title: "Highlight Plaza Catalunya coverage".to_string(),
                pexels_query_suggestion: Some("nothing matches this".to_string()),
                ..Recommendation::default()
            }],
            ..AsoReport::default()
        };

        let search = FakeSearch::missing(&["nothing matches this"]);
        enrich_report(&mut report, "Spain", &search, Duration::ZERO).await;

        assert_eq!(
            search.queries(),
            vec!["nothing matches this", "plaza catalunya Spain parking"]
        );
        assert!(report.recommendations[0].pexels_image_url.is_some());
    }

    #[tokio::test]
    async fn bare_ztl_mention_uses_zone_sign_query() {
        let mut report = AsoReport {
            recommendations: vec![Recommendation {
                title: "Explain restricted access".to_string(),
                insight: "Milan drivers need ZTL alerts before entering".to_string(),
                ..Recommendation::default()
            }],
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        enrich_report(&mut report, "Italy", &search, Duration::ZERO).await;

        assert_eq!(search.queries(), vec!["ztl Italy parking sign"]);
    }

    #[tokio::test]
    async fn recommendation_facts_use_place_zone_then_generic_queries() {
        let mut report = AsoReport {
            recommendations: vec![Recommendation {
                title: "Local parking wins".to_string(),
                local_data: vec![
                    fact("Residents near Piazza Navona pay less", "pricing"),
                    fact("Zona blu hours differ on weekends", "schedule"),
                    fact("Weekend demand doubles downtown everywhere", "demand"),
                ],
                ..Recommendation::default()
            }],
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        let applied = enrich_report(&mut report, "Italy", &search, Duration::ZERO).await;

        assert_eq!(applied, 3);
        assert_eq!(
            search.queries(),
            vec![
                "piazza Italy parking",
                "zona blu Italy parking sign",
                "weekend demand doubles Italy local",
            ]
        );
    }

    #[tokio::test]
    async fn benchmark_match_fills_url_only() {
        let mut report = AsoReport {
            benchmark_comparisons: vec![BenchmarkComparison {
                title: "Icon contrast".to_string(),
                description: "Competitors shoot along Via Montenapoleone at dusk".to_string(),
                ..BenchmarkComparison::default()
            }],
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        let applied = enrich_report(&mut report, "Italy", &search, Duration::ZERO).await;

        assert_eq!(applied, 1);
        assert_eq!(search.queries(), vec!["Via Montenapoleone Italy"]);
        assert!(report.benchmark_comparisons[0].pexels_image_url.is_some());
    }

    #[tokio::test]
    async fn complete_report_triggers_no_lookups() {
        let mut report = AsoReport {
            cultural_insights: CulturalInsights {
                local_data: vec![LocalFact {
                    pexels_image_url: Some("https://images.test/a.jpg".to_string()),
                    ..fact("Some fact", "relevance")
                }],
                ..CulturalInsights::default()
            },
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        let applied = enrich_report(&mut report, "Spain", &search, Duration::ZERO).await;

        assert_eq!(applied, 0);
        assert!(search.queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_are_spaced_by_the_configured_delay() {
        let mut report = AsoReport {
            cultural_insights: CulturalInsights {
                local_data: vec![
                    fact("First fact about parking pressure", "a"),
                    fact("Second fact about parking pressure", "b"),
                    fact("Third fact about parking pressure", "c"),
                ],
                ..CulturalInsights::default()
            },
            ..AsoReport::default()
        };

        let search = FakeSearch::default();
        let started = tokio::time::Instant::now();
        enrich_report(&mut report, "Spain", &search, Duration::from_secs(2)).await;

        // Three lookups, two gaps.
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }
}
