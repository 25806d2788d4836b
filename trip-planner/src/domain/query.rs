//! Search queries.
//!
//! The search form hands its nine fields over as URL query parameters, any of
//! which may be missing or blank. [`CanonicalQuery::from_raw`] turns that loose
//! mapping into a fully populated, typed query. It never fails: absent, blank
//! or unparseable values fall back to fixed defaults, and no cross-field
//! validation happens here (an inverted date range passes straight through).

use std::collections::HashMap;

use chrono::NaiveDate;

use super::money::Money;
use super::vacation::VacationType;

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameter names, as sent by the search form and to the discovery service.
pub mod keys {
    pub const STARTING_CITY: &str = "startingCity";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const FLIGHT_BUDGET: &str = "flightBudget";
    pub const HOTEL_BUDGET: &str = "hotelBudget";
    pub const ACTIVITIES_BUDGET: &str = "activitiesBudget";
    pub const TOTAL_BUDGET: &str = "totalBudget";
    pub const VACATION_TYPE: &str = "vacationType";
    pub const NUMBER_OF_PEOPLE: &str = "numberOfPeople";
}

/// Values substituted for missing fields.
pub mod defaults {
    pub const STARTING_CITY: &str = "New York";
    pub const START_DATE: &str = "2024-06-01";
    pub const END_DATE: &str = "2024-06-15";
    pub const FLIGHT_BUDGET: &str = "800";
    pub const HOTEL_BUDGET: &str = "150";
    pub const ACTIVITIES_BUDGET: &str = "300";
    pub const TOTAL_BUDGET: &str = "1250";
    pub const VACATION_TYPE: &str = "Beach";
    pub const NUMBER_OF_PEOPLE: &str = "2";
}

/// Raw key/value input from the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery(HashMap<String, String>);

impl RawQuery {
    /// An empty mapping (every field will default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// A field's value, treating the empty string as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl From<HashMap<String, String>> for RawQuery {
    fn from(map: HashMap<String, String>) -> Self {
        RawQuery(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawQuery(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A fully populated search query.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalQuery {
    pub starting_city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub flight_budget: Money,
    pub hotel_budget: Money,
    pub activities_budget: Money,
    pub total_budget: Money,
    pub vacation_type: VacationType,
    /// Always at least 1.
    pub number_of_people: u32,
}

impl CanonicalQuery {
    /// Normalize raw form input, substituting defaults for anything missing.
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            starting_city: raw
                .get(keys::STARTING_CITY)
                .unwrap_or(defaults::STARTING_CITY)
                .to_string(),
            start_date: date_field(raw, keys::START_DATE, defaults::START_DATE),
            end_date: date_field(raw, keys::END_DATE, defaults::END_DATE),
            flight_budget: money_field(raw, keys::FLIGHT_BUDGET, defaults::FLIGHT_BUDGET),
            hotel_budget: money_field(raw, keys::HOTEL_BUDGET, defaults::HOTEL_BUDGET),
            activities_budget: money_field(
                raw,
                keys::ACTIVITIES_BUDGET,
                defaults::ACTIVITIES_BUDGET,
            ),
            total_budget: money_field(raw, keys::TOTAL_BUDGET, defaults::TOTAL_BUDGET),
            vacation_type: VacationType::parse(
                raw.get(keys::VACATION_TYPE)
                    .unwrap_or(defaults::VACATION_TYPE),
            ),
            number_of_people: people_field(raw),
        }
    }

    /// Whole days between the start and end dates.
    ///
    /// Zero or negative when the range is empty or inverted.
    pub fn trip_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// The query as flat string pairs for the discovery endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (keys::STARTING_CITY, self.starting_city.clone()),
            (keys::START_DATE, self.start_date.format(DATE_FORMAT).to_string()),
            (keys::END_DATE, self.end_date.format(DATE_FORMAT).to_string()),
            (keys::FLIGHT_BUDGET, self.flight_budget.to_plain_string()),
            (keys::HOTEL_BUDGET, self.hotel_budget.to_plain_string()),
            (
                keys::ACTIVITIES_BUDGET,
                self.activities_budget.to_plain_string(),
            ),
            (keys::TOTAL_BUDGET, self.total_budget.to_plain_string()),
            (keys::VACATION_TYPE, self.vacation_type.as_str().to_string()),
            (keys::NUMBER_OF_PEOPLE, self.number_of_people.to_string()),
        ]
    }
}

impl Default for CanonicalQuery {
    fn default() -> Self {
        Self::from_raw(&RawQuery::new())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn date_field(raw: &RawQuery, key: &str, default: &str) -> NaiveDate {
    raw.get(key)
        .and_then(parse_date)
        .or_else(|| parse_date(default))
        .unwrap_or_default()
}

fn money_field(raw: &RawQuery, key: &str, default: &str) -> Money {
    raw.get(key)
        .and_then(Money::parse)
        .or_else(|| Money::parse(default))
        .unwrap_or(Money::ZERO)
}

fn people_field(raw: &RawQuery) -> u32 {
    raw.get(keys::NUMBER_OF_PEOPLE)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .or_else(|| defaults::NUMBER_OF_PEOPLE.parse().ok())
        .unwrap_or(1)
}
