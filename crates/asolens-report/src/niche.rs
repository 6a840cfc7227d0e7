//! App niche detection from listing text.
//!
//! The prompt instructs the model to adapt every section of the report to
//! the app's niche, so generic reports for a chess app don't talk about
//! parking meters. Detection is a keyword-table scan over the lowercased
//! title, description, and category; the first niche with any hit wins.

/// Detected app niche, used to steer the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Niche {
    Parking,
    Chess,
    Fitness,
    Food,
    Travel,
    Finance,
    Education,
    Social,
    Productivity,
    Music,
    Photo,
    General,
}

impl Niche {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Niche::Parking => "parking",
            Niche::Chess => "chess",
            Niche::Fitness => "fitness",
            Niche::Food => "food",
            Niche::Travel => "travel",
            Niche::Finance => "finance",
            Niche::Education => "education",
            Niche::Social => "social",
            Niche::Productivity => "productivity",
            Niche::Music => "music",
            Niche::Photo => "photo",
            Niche::General => "general",
        }
    }
}

impl std::fmt::Display for Niche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan order matters: earlier niches win over later ones when keywords
/// from both appear.
const NICHE_KEYWORDS: &[(Niche, &[&str])] = &[
    (
        Niche::Parking,
        &[
            "parking",
            "park",
            "aparcar",
            "parcheggio",
            "estacionamiento",
            "zona azul",
            "ztl",
        ],
    ),
    (
        Niche::Chess,
        &["chess", "ajedrez", "scacchi", "schach", "échecs", "game", "play"],
    ),
    (
        Niche::Fitness,
        &["fitness", "workout", "exercise", "gym", "training", "health"],
    ),
    (
        Niche::Food,
        &["food", "restaurant", "comida", "ristorante", "delivery", "order"],
    ),
    (
        Niche::Travel,
        &["travel", "trip", "viaje", "viaggio", "hotel", "booking"],
    ),
    (
        Niche::Finance,
        &["finance", "bank", "money", "payment", "wallet", "finanza"],
    ),
    (
        Niche::Education,
        &["education", "learn", "study", "curso", "corso", "aprender"],
    ),
    (
        Niche::Social,
        &["social", "chat", "message", "connect", "community"],
    ),
    (
        Niche::Productivity,
        &["productivity", "task", "todo", "organize", "manage"],
    ),
    (Niche::Music, &["music", "song", "audio", "playlist", "stream"]),
    (Niche::Photo, &["photo", "camera", "image", "picture", "edit"]),
];

/// Detect the app's niche from its title, description, and category.
///
/// Case-insensitive substring scan; falls back to [`Niche::General`] when
/// nothing matches.
#[must_use]
pub fn detect_niche(title: &str, description: &str, category: &str) -> Niche {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    let category = category.to_lowercase();

    for (niche, keywords) in NICHE_KEYWORDS {
        let hit = keywords.iter().any(|kw| {
            title.contains(kw) || description.contains(kw) || category.contains(kw)
        });
        if hit {
            return *niche;
        }
    }
    Niche::General
}

/// Niche-specific framing injected into the prompt.
///
/// Niches without a dedicated blurb fall back to a category-driven one.
#[must_use]
pub fn niche_context(niche: Niche, category: &str) -> String {
    match niche {
        Niche::Chess => "This is a CHESS GAME application. Focus on chess-related terminology, \
            chess pieces, chess boards, tournaments, strategies, and chess culture. Cities \
            should be adapted to chess culture (famous chess clubs, tournaments, chess cafes). \
            Local objects should be chess-related (chess sets, clocks, boards). Cultural \
            elements should relate to chess traditions and events."
            .to_string(),
        Niche::Parking => "This is a PARKING/MOBILITY application. Focus on parking zones, \
            traffic regulations, urban mobility, parking signs, and transportation. Cities \
            should include famous streets and parking areas. Local objects should be \
            transportation-related (scooters, cars, parking meters)."
            .to_string(),
        Niche::Fitness => "This is a FITNESS/HEALTH application. Focus on gyms, workouts, \
            exercises, health trends, and fitness culture. Cities should include famous gyms \
            and fitness centers. Local objects should be fitness-related (weights, yoga mats, \
            running paths)."
            .to_string(),
        Niche::Food => "This is a FOOD/RESTAURANT application. Focus on local cuisine, \
            restaurants, food delivery, and culinary culture. Cities should include famous \
            restaurants and food markets. Local objects should be food-related (dishes, \
            ingredients, cooking tools)."
            .to_string(),
        _ => format!(
            "This is a {} application. Adapt all cultural insights, cities, local objects, \
             and terminology to be relevant to this specific category and niche.",
            category.to_uppercase()
        ),
    }
}
