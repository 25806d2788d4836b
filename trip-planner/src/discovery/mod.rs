//! Destination discovery service client.
//!
//! The service answers two questions: which destinations match a search
//! (`GET /api/v2/discovery`), and what is known about one destination
//! (`GET /api/v2/details/{id}`). Both wrap their payload in a
//! `{ success, data, message }` envelope.
//!
//! Failures fall into three groups, see [`ClientError`]: transport
//! (bad status or no connection), application (`success: false`), and
//! unreadable bodies, which surface with the same fallback message an
//! application error without a message would.

mod client;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_RESULT_LIMIT, DiscoveryClient, DiscoveryConfig};
pub use error::{
    ClientError, DETAIL_FALLBACK_MESSAGE, DetailError, DiscoveryError, LIST_FALLBACK_MESSAGE,
};
pub use mock::StaticDestinations;
pub use types::{DetailResponse, DiscoveryData, DiscoveryResponse, Envelope};
