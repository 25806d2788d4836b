//! Trip cost estimation.
//!
//! Combines the traveller's own budget figures with the destination's
//! lodging price:
//!
//! ```text
//! flights     = flight budget     × travellers
//! lodging     = mid-range nightly × nights
//! activities  = activities budget × travellers
//! ```
//!
//! Lodging is per stay, not per person. When the destination gives no usable
//! nightly price, [`FALLBACK_NIGHTLY_RATE`] is used. An empty or inverted date
//! range is not an error: the lodging term simply comes out zero or negative.

use crate::domain::{CanonicalQuery, DestinationDetail, DestinationProfile, DestinationSummary, Money};

/// Nightly rate assumed when a destination has none.
pub const FALLBACK_NIGHTLY_RATE: Money = Money::new(100.0);

/// Anything that may know its mid-range nightly lodging price.
pub trait NightlyRate {
    fn nightly_rate(&self) -> Option<Money>;
}

impl NightlyRate for DestinationSummary {
    fn nightly_rate(&self) -> Option<Money> {
        self.accommodation.as_ref().and_then(|a| a.mid_range_amount())
    }
}

impl NightlyRate for DestinationDetail {
    fn nightly_rate(&self) -> Option<Money> {
        self.accommodation.as_ref().and_then(|a| a.mid_range_amount())
    }
}

impl NightlyRate for DestinationProfile {
    fn nightly_rate(&self) -> Option<Money> {
        self.nightly_rate
    }
}

/// The three terms of an estimate and their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Nights in the stay; may be zero or negative for a bad date range.
    pub days: i64,
    pub flights: Money,
    pub lodging: Money,
    pub activities: Money,
    pub total: Money,
}

/// Estimate each cost term for a trip to `destination`.
pub fn estimate_breakdown(query: &CanonicalQuery, destination: &impl NightlyRate) -> CostBreakdown {
    let days = query.trip_days();
    let people = f64::from(query.number_of_people);
    let nightly = destination.nightly_rate().unwrap_or(FALLBACK_NIGHTLY_RATE);

    let flights = query.flight_budget * people;
    let lodging = nightly * days as f64;
    let activities = query.activities_budget * people;

    CostBreakdown {
        days,
        flights,
        lodging,
        activities,
        total: flights + lodging + activities,
    }
}

/// Estimated total cost of a trip to `destination`.
pub fn estimate_total_cost(query: &CanonicalQuery, destination: &impl NightlyRate) -> Money {
    estimate_breakdown(query, destination).total
}
