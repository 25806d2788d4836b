//! Domain types for the trip planner.
//!
//! Search queries, money, and the destination records exchanged with the
//! discovery service. Parsing here is forgiving: malformed input degrades
//! to defaults rather than failing.

mod destination;
mod money;
mod profile;
mod query;
mod vacation;

pub use destination::{
    AccommodationRates, Activity, DestinationDetail, DestinationId, DestinationSummary,
    FlightInfo, FoodAndDining, PriceValue,
};
pub use money::Money;
pub use profile::{ActivityLine, DestinationProfile, DiningSection};
pub use query::{CanonicalQuery, DATE_FORMAT, RawQuery, defaults, keys};
pub use vacation::VacationType;
