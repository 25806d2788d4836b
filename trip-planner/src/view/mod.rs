//! Results view: the destination list and the detail panel.
//!
//! [`ResultsView`] is the synchronous state machine; [`ResultsSession`]
//! drives it against a [`DestinationSource`], letting detail fetches
//! overlap while only the most recent selection can reach the view.

mod session;
mod source;
mod state;

pub use session::ResultsSession;
pub use source::DestinationSource;
pub use state::{Outcome, Phase, RequestToken, ResultsView, ViewState};
