//! Results view state machine.
//!
//! Two independent tracks share one [`ViewState`]:
//!
//! ```text
//! list:    Loading ──ok──▶ Ready
//!             └────err──▶ Error      (earlier results stay visible)
//! detail:  Closed ──select──▶ Loading ──ok──▶ Open
//!                                └────err──▶ Closed + error recorded
//! ```
//!
//! Every request is issued a [`RequestToken`]. A response is applied only
//! while its token is still the current one for its track; selecting another
//! destination, closing the detail, or starting a new search retires the old
//! token, and the late response is discarded.

use tracing::{debug, warn};

use crate::discovery::ClientError;
use crate::domain::{DestinationDetail, DestinationId, DestinationProfile, DestinationSummary};

/// Where the destination list is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Error,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Whether a response made it into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Superseded or cancelled; the view is unchanged.
    Discarded,
}

/// Everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    /// Replaced wholesale on every successful search.
    pub summaries: Vec<DestinationSummary>,
    /// Last list failure, kept even when the list stays visible.
    pub error_message: Option<String>,
    /// Whether that failure was below the application envelope.
    pub error_is_transport: bool,
    pub selected_detail: Option<DestinationProfile>,
    pub detail_open: bool,
    /// Destination whose detail is being fetched.
    pub detail_loading: Option<DestinationId>,
    /// Last detail failure.
    pub detail_error: Option<String>,
}

impl ViewState {
    fn mounted() -> Self {
        Self {
            phase: Phase::Loading,
            summaries: Vec::new(),
            error_message: None,
            error_is_transport: false,
            selected_detail: None,
            detail_open: false,
            detail_loading: None,
            detail_error: None,
        }
    }

    /// The full-page error replaces the list only when there is no list.
    pub fn shows_error_screen(&self) -> bool {
        self.phase == Phase::Error && self.summaries.is_empty()
    }
}

/// The results view state machine.
///
/// Single writer: callers issue requests with the `begin_*` methods, perform
/// the fetch however they like, and hand the result back to the matching
/// `finish_*` method together with the token they were given.
#[derive(Debug)]
pub struct ResultsView {
    state: ViewState,
    last_token: u64,
    list_request: Option<RequestToken>,
    detail_request: Option<(RequestToken, DestinationId)>,
}

impl ResultsView {
    /// A freshly mounted view, waiting for its first list.
    pub fn new() -> Self {
        Self {
            state: ViewState::mounted(),
            last_token: 0,
            list_request: None,
            detail_request: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    fn issue(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    /// Start a list fetch. Any earlier list fetch is superseded.
    pub fn begin_list(&mut self) -> RequestToken {
        let token = self.issue();
        self.list_request = Some(token);
        self.state.phase = Phase::Loading;
        self.state.error_message = None;
        self.state.error_is_transport = false;
        token
    }

    /// Apply the result of the list fetch issued as `token`.
    pub fn finish_list(
        &mut self,
        token: RequestToken,
        result: Result<Vec<DestinationSummary>, ClientError>,
    ) -> Outcome {
        if self.list_request != Some(token) {
            debug!(?token, "discarding superseded destination list");
            return Outcome::Discarded;
        }
        self.list_request = None;

        match result {
            Ok(summaries) => {
                self.state.summaries = summaries;
                self.state.phase = Phase::Ready;
            }
            Err(e) => {
                warn!(error = %e, kept = self.state.summaries.len(), "error fetching destinations");
                self.state.error_message = Some(e.to_string());
                self.state.error_is_transport = e.is_transport();
                self.state.phase = Phase::Error;
            }
        }
        Outcome::Applied
    }

    /// Start fetching the detail for `id`. Any earlier detail fetch is superseded.
    ///
    /// A detail that is already open stays open until the new one arrives.
    pub fn begin_detail(&mut self, id: DestinationId) -> RequestToken {
        let token = self.issue();
        self.state.detail_loading = Some(id.clone());
        self.state.detail_error = None;
        self.detail_request = Some((token, id));
        token
    }

    /// Apply the result of the detail fetch issued as `token`.
    pub fn finish_detail(
        &mut self,
        token: RequestToken,
        result: Result<DestinationDetail, ClientError>,
    ) -> Outcome {
        let id = match self.detail_request.take() {
            Some((current, id)) if current == token => id,
            other => {
                self.detail_request = other;
                debug!(?token, "discarding stale destination detail");
                return Outcome::Discarded;
            }
        };
        self.state.detail_loading = None;

        match result {
            Ok(detail) => {
                self.state.selected_detail = Some(DestinationProfile::from_detail(&id, &detail));
                self.state.detail_open = true;
            }
            Err(e) => {
                warn!(%id, error = %e, "error fetching destination details");
                self.state.detail_error = Some(e.to_string());
            }
        }
        Outcome::Applied
    }

    /// Close the detail unconditionally, cancelling any detail fetch in flight.
    pub fn close_detail(&mut self) {
        self.detail_request = None;
        self.state.detail_open = false;
        self.state.selected_detail = None;
        self.state.detail_loading = None;
    }
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new()
    }
}
