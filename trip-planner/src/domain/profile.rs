//! Display-ready destination profiles.
//!
//! A detail record is normalized once, when it arrives, into a
//! [`DestinationProfile`] in which every shown field already has its
//! fallback applied. Renderers never deal with missing data.

use super::destination::{DestinationDetail, DestinationId, PriceValue, present_price};
use super::money::Money;

pub const FALLBACK_FLIGHT_DURATION: &str = "12-15 hours";
pub const FALLBACK_FLIGHT_COST: &str = "$600-900";
pub const FALLBACK_AIRPORTS: &str = "International Airport";
pub const FALLBACK_BUDGET_RATE: &str = "$30-80/night";
pub const FALLBACK_MID_RANGE_RATE: &str = "$80-200/night";
pub const FALLBACK_LUXURY_RATE: &str = "$200-500/night";

/// One activity, ready to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    pub name: String,
    pub cost: String,
    pub duration: String,
    pub description: String,
}

/// Food section, present only when the service sent one.
#[derive(Debug, Clone, PartialEq)]
pub struct DiningSection {
    pub average_meal_cost: String,
    pub must_try_dishes: Vec<String>,
}

/// A destination detail with every fallback resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationProfile {
    pub id: DestinationId,
    pub name: String,
    pub country: String,
    pub image: Option<String>,
    pub about: String,
    pub flight_duration: String,
    pub flight_cost: String,
    pub airports: String,
    pub budget_rate: String,
    pub mid_range_rate: String,
    pub luxury_rate: String,
    /// Empty when the service named none.
    pub recommendations: Vec<String>,
    pub activities: Vec<ActivityLine>,
    pub dining: Option<DiningSection>,
    /// Mid-range nightly price as an amount, for cost estimates.
    pub nightly_rate: Option<Money>,
}

impl DestinationProfile {
    /// Normalize a detail record.
    ///
    /// `requested` is the id the record was fetched under; it stands in
    /// when the record does not carry its own.
    pub fn from_detail(requested: &DestinationId, detail: &DestinationDetail) -> Self {
        let flight = detail.flight_info.clone().unwrap_or_default();
        let lodging = detail.accommodation.clone().unwrap_or_default();

        let airports = flight
            .major_airports
            .as_deref()
            .map(|a| a.join(", "))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_AIRPORTS.to_string());

        let activities = detail
            .activities
            .iter()
            .flatten()
            .map(|a| ActivityLine {
                name: a.name.clone(),
                cost: present_price(&a.cost).map(ToString::to_string).unwrap_or_default(),
                duration: a.duration.clone().unwrap_or_default(),
                description: a.description.clone().unwrap_or_default(),
            })
            .collect();

        let dining = detail.food_and_dining.as_ref().map(|food| DiningSection {
            average_meal_cost: present_price(&food.average_meal_cost)
                .map(ToString::to_string)
                .unwrap_or_default(),
            must_try_dishes: food.must_try_dishes.clone().unwrap_or_default(),
        });

        Self {
            id: detail.id.clone().unwrap_or_else(|| requested.clone()),
            name: detail.name.clone(),
            country: detail.country.clone().unwrap_or_default(),
            image: detail.images.first().filter(|s| !s.is_empty()).cloned(),
            about: non_empty(&detail.detailed_description)
                .or_else(|| non_empty(&detail.description))
                .unwrap_or_default()
                .to_string(),
            flight_duration: text_or(&flight.average_duration, FALLBACK_FLIGHT_DURATION),
            flight_cost: price_or(&flight.average_cost, FALLBACK_FLIGHT_COST),
            airports,
            budget_rate: price_or(&lodging.budget, FALLBACK_BUDGET_RATE),
            mid_range_rate: price_or(&lodging.mid_range, FALLBACK_MID_RANGE_RATE),
            luxury_rate: price_or(&lodging.luxury, FALLBACK_LUXURY_RATE),
            recommendations: lodging.recommendations.clone().unwrap_or_default(),
            nightly_rate: lodging.mid_range_amount(),
            activities,
            dining,
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

fn text_or(s: &Option<String>, fallback: &str) -> String {
    non_empty(s).unwrap_or(fallback).to_string()
}

fn price_or(price: &Option<PriceValue>, fallback: &str) -> String {
    present_price(price)
        .map(ToString::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> DestinationDetail {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn bare_record_gets_every_fallback() {
        let id = DestinationId::new("d1");
        let profile = DestinationProfile::from_detail(&id, &parse(json!({ "name": "Nowhere" })));

        assert_eq!(profile.id, id);
        assert_eq!(profile.name, "Nowhere");
        assert_eq!(profile.about, "");
        assert_eq!(profile.flight_duration, "12-15 hours");
        assert_eq!(profile.flight_cost, "$600-900");
        assert_eq!(profile.airports, "International Airport");
        assert_eq!(profile.budget_rate, "$30-80/night");
        assert_eq!(profile.mid_range_rate, "$80-200/night");
        assert_eq!(profile.luxury_rate, "$200-500/night");
        assert!(profile.recommendations.is_empty());
        assert!(profile.activities.is_empty());
        assert!(profile.dining.is_none());
        assert!(profile.image.is_none());
        assert_eq!(profile.nightly_rate, None);
    }

    #[test]
    fn supplied_values_are_kept() {
        let detail = parse(json!({
            "id": "santorini",
            "name": "Santorini",
            "country": "Greece",
            "description": "Short",
            "detailedDescription": "Long and lovely",
            "images": ["https://img/santorini.jpg"],
            "flightInfo": {
                "averageDuration": "10 hours",
                "averageCost": "$700",
                "majorAirports": ["JTR", "ATH"]
            },
            "accommodation": {
                "budget": 60,
                "midRange": 140,
                "luxury": "$450+/night",
                "recommendations": ["Canaves Oia"]
            },
            "activities": [
                { "name": "Sunset cruise", "cost": 90, "duration": "4 hours", "description": "Caldera views" }
            ],
            "foodAndDining": { "averageMealCost": "$25", "mustTryDishes": ["Fava", "Tomatokeftedes"] }
        }));

        let profile = DestinationProfile::from_detail(&DestinationId::new("other"), &detail);

        assert_eq!(profile.id, DestinationId::new("santorini"));
        assert_eq!(profile.about, "Long and lovely");
        assert_eq!(profile.image.as_deref(), Some("https://img/santorini.jpg"));
        assert_eq!(profile.flight_duration, "10 hours");
        assert_eq!(profile.flight_cost, "$700");
        assert_eq!(profile.airports, "JTR, ATH");
        assert_eq!(profile.budget_rate, "$60");
        assert_eq!(profile.mid_range_rate, "$140");
        assert_eq!(profile.luxury_rate, "$450+/night");
        assert_eq!(profile.recommendations, vec!["Canaves Oia"]);
        assert_eq!(profile.nightly_rate, Some(Money::new(140.0)));

        let activity = &profile.activities[0];
        assert_eq!(activity.name, "Sunset cruise");
        assert_eq!(activity.cost, "$90");
        assert_eq!(activity.duration, "4 hours");

        let dining = profile.dining.unwrap();
        assert_eq!(dining.average_meal_cost, "$25");
        assert_eq!(dining.must_try_dishes.len(), 2);
    }

    #[test]
    fn description_used_when_no_detailed_description() {
        let detail = parse(json!({ "description": "Sunny", "detailedDescription": "" }));
        let profile = DestinationProfile::from_detail(&DestinationId::new("x"), &detail);
        assert_eq!(profile.about, "Sunny");
    }

    #[test]
    fn blank_strings_fall_back() {
        let detail = parse(json!({
            "flightInfo": { "averageDuration": "", "averageCost": "", "majorAirports": [] },
            "accommodation": { "midRange": "" }
        }));
        let profile = DestinationProfile::from_detail(&DestinationId::new("x"), &detail);

        assert_eq!(profile.flight_duration, FALLBACK_FLIGHT_DURATION);
        assert_eq!(profile.flight_cost, FALLBACK_FLIGHT_COST);
        assert_eq!(profile.airports, FALLBACK_AIRPORTS);
        assert_eq!(profile.mid_range_rate, FALLBACK_MID_RANGE_RATE);
    }
}
