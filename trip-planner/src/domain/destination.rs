//! Destination records returned by the discovery service.
//!
//! These map directly onto the service's JSON. The service is loose about
//! which fields it sends, so nearly everything is optional and `null` is
//! accepted wherever a missing field would be.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::money::Money;

/// Identifier shared by a summary and its detail record.
///
/// The service sends either strings or numbers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    pub fn new(id: impl Into<String>) -> Self {
        DestinationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DestinationId {
    fn from(s: &str) -> Self {
        DestinationId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for DestinationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(s) => DestinationId(s),
            Wire::Int(n) => DestinationId(n.to_string()),
            Wire::Float(n) => DestinationId(n.to_string()),
        })
    }
}

/// A price as the service reports it: a bare number or a free-form
/// string like `"$80-200/night"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Text(String),
}

impl PriceValue {
    /// The price as a single amount, if it is one.
    ///
    /// Numeric strings such as `"120"` count; ranges and prose do not.
    pub fn as_amount(&self) -> Option<Money> {
        match self {
            PriceValue::Amount(n) if n.is_finite() => Some(Money::new(*n)),
            PriceValue::Amount(_) => None,
            PriceValue::Text(s) => Money::parse(s),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, PriceValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Amount(n) => write!(f, "{}", Money::new(*n)),
            PriceValue::Text(s) => f.write_str(s),
        }
    }
}

/// Nightly lodging prices by tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationRates {
    pub budget: Option<PriceValue>,
    pub mid_range: Option<PriceValue>,
    pub luxury: Option<PriceValue>,
    pub recommendations: Option<Vec<String>>,
}

impl AccommodationRates {
    /// The mid-range nightly rate, when it is a usable amount.
    pub fn mid_range_amount(&self) -> Option<Money> {
        self.mid_range.as_ref().and_then(PriceValue::as_amount)
    }
}

/// Abbreviated destination from the discovery list.
///
/// Only `id` is strict. A badly typed optional field reads as missing, so
/// one odd record cannot spoil the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSummary {
    pub id: DestinationId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub highlights: Vec<String>,
    /// Nominally 0 to 5.
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "default_on_error")]
    pub accommodation: Option<AccommodationRates>,
}

/// Flight facts for a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInfo {
    pub average_duration: Option<String>,
    pub average_cost: Option<PriceValue>,
    pub major_airports: Option<Vec<String>>,
}

/// Something to do at a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub cost: Option<PriceValue>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

/// Food and dining facts for a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAndDining {
    pub average_meal_cost: Option<PriceValue>,
    pub must_try_dishes: Option<Vec<String>>,
}

/// Full destination record from the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDetail {
    #[serde(default)]
    pub id: Option<DestinationId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub flight_info: Option<FlightInfo>,
    #[serde(default)]
    pub accommodation: Option<AccommodationRates>,
    #[serde(default)]
    pub activities: Option<Vec<Activity>>,
    #[serde(default)]
    pub food_and_dining: Option<FoodAndDining>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A string, a number as text, or empty for anything else.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// The strings of an array; other elements and non-arrays are dropped.
fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A finite number, also from a numeric string.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let n = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(n.filter(|n: &f64| n.is_finite()))
}

/// The field if it has the expected shape, otherwise its default.
fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// `Some` only for prices that have something to show.
pub(crate) fn present_price(price: &Option<PriceValue>) -> Option<&PriceValue> {
    price.as_ref().filter(|p| !p.is_blank())
}
