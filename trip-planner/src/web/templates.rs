//! Askama templates for the web frontend.

use askama::Template;
use reqwest::Url;

use crate::domain::{
    CanonicalQuery, DestinationId, DestinationProfile, DestinationSummary, VacationType, defaults,
};
use crate::estimate::{NightlyRate, estimate_breakdown, estimate_total_cost};

/// Where a destination without images points.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder-destination.svg";

/// Rating shown when a destination has none.
const DEFAULT_RATING: f64 = 4.0;

const DESCRIPTION_PREVIEW_CHARS: usize = 120;
const HIGHLIGHT_PREVIEW_CHARS: usize = 30;
const HIGHLIGHTS_ON_CARD: usize = 2;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub vacation_types: Vec<&'static str>,
    pub default_city: &'static str,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            vacation_types: VacationType::KNOWN_LABELS.to_vec(),
            default_city: defaults::STARTING_CITY,
        }
    }
}

/// Full-page error with a way back to the search.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// Destination list, optionally with one destination's detail open over it.
#[derive(Template)]
#[template(path = "destinations.html")]
pub struct DestinationsTemplate {
    pub cards: Vec<CardView>,
    /// Query string of this search, for links that keep it.
    pub query_string: String,
    /// Recorded list failure while older results are still shown.
    pub list_error: Option<String>,
    pub detail: Option<DetailView>,
    pub detail_error: Option<String>,
}

impl DestinationsTemplate {
    /// Link that reopens the list without any detail.
    pub fn close_href(&self) -> String {
        format!("/destinations?{}", self.query_string)
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One destination card.
#[derive(Debug, Clone)]
pub struct CardView {
    pub href: String,
    pub name: String,
    pub country: String,
    pub kind: String,
    pub image: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub estimated_cost: String,
    pub stars: String,
    pub rating: String,
}

impl CardView {
    /// Build a card for `summary` under the given search.
    pub fn from_summary(summary: &DestinationSummary, query: &CanonicalQuery, query_string: &str) -> Self {
        let rating = summary
            .rating
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_RATING);

        Self {
            href: format!("{}?{}", detail_path(&summary.id), query_string),
            name: summary.name.clone(),
            country: summary.country.clone(),
            kind: summary.kind.clone(),
            image: summary
                .images
                .first()
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            description: format!(
                "{}...",
                truncate_chars(&summary.description, DESCRIPTION_PREVIEW_CHARS)
            ),
            highlights: summary
                .highlights
                .iter()
                .take(HIGHLIGHTS_ON_CARD)
                .map(|h| preview(h, HIGHLIGHT_PREVIEW_CHARS))
                .collect(),
            estimated_cost: estimate_total_cost(query, summary).to_string(),
            stars: "★".repeat(rating.clamp(0.0, 5.0).floor() as usize),
            rating: format!("{rating:.1}"),
        }
    }
}

/// The open detail panel.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub profile: DestinationProfile,
    pub image: String,
    pub nights: i64,
    pub flights_cost: String,
    pub lodging_cost: String,
    pub activities_cost: String,
    pub estimated_total: String,
    /// Whether the lodging estimate used the fallback nightly rate.
    pub assumed_rate: bool,
}

impl DetailView {
    pub fn new(profile: &DestinationProfile, query: &CanonicalQuery) -> Self {
        let cost = estimate_breakdown(query, profile);

        Self {
            image: profile
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            nights: cost.days,
            flights_cost: cost.flights.to_string(),
            lodging_cost: cost.lodging.to_string(),
            activities_cost: cost.activities.to_string(),
            estimated_total: cost.total.to_string(),
            assumed_rate: profile.nightly_rate().is_none(),
            profile: profile.clone(),
        }
    }
}

/// `/destinations/{id}`, with `id` percent-encoded as a single path segment.
fn detail_path(id: &DestinationId) -> String {
    let Ok(mut url) = Url::parse("http://localhost/destinations") else {
        return "/destinations".to_string();
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.push(id.as_str());
    }
    url.path().to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `s`, or its first `max` characters followed by "..." when longer.
fn preview(s: &str, max: usize) -> String {
    let cut = truncate_chars(s, max);
    if cut.len() < s.len() {
        format!("{cut}...")
    } else {
        s.to_string()
    }
}
