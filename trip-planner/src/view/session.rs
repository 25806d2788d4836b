//! Async driver for the results view.
//!
//! [`ResultsSession`] owns a [`ResultsView`] and runs its fetches as tokio
//! tasks in a [`JoinSet`]. Completions are applied one at a time, so the view
//! keeps a single writer however the responses interleave. Dropping the
//! session aborts whatever is still in flight.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::discovery::{ClientError, DETAIL_FALLBACK_MESSAGE, LIST_FALLBACK_MESSAGE};
use crate::domain::{CanonicalQuery, DestinationDetail, DestinationId, DestinationSummary};

use super::source::DestinationSource;
use super::state::{Outcome, RequestToken, ResultsView, ViewState};

/// A finished fetch, waiting to be applied.
enum Completion {
    List {
        token: RequestToken,
        result: Result<Vec<DestinationSummary>, ClientError>,
    },
    Detail {
        token: RequestToken,
        result: Result<DestinationDetail, ClientError>,
    },
}

/// One user's results page: the current query, the view, and its fetches.
pub struct ResultsSession {
    source: Arc<dyn DestinationSource>,
    view: ResultsView,
    query: CanonicalQuery,
    tasks: JoinSet<Completion>,
}

impl ResultsSession {
    /// Mount the view for `query` and start fetching its destinations.
    pub fn mount(source: Arc<dyn DestinationSource>, query: CanonicalQuery) -> Self {
        let mut session = Self {
            source,
            view: ResultsView::new(),
            query,
            tasks: JoinSet::new(),
        };
        session.fetch_list();
        session
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn query(&self) -> &CanonicalQuery {
        &self.query
    }

    /// Fetches started but not yet applied or discarded.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Switch to a new query. An unchanged query does nothing.
    ///
    /// Returns whether a new search was started.
    pub fn query_changed(&mut self, query: CanonicalQuery) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query;
        self.fetch_list();
        true
    }

    /// Search again with the current query.
    pub fn retry(&mut self) {
        self.fetch_list();
    }

    /// The user picked a destination card.
    pub fn select(&mut self, id: DestinationId) {
        let token = self.view.begin_detail(id.clone());
        debug!(%id, ?token, "fetching destination details");

        let source = Arc::clone(&self.source);
        self.tasks.spawn(async move {
            let result = AssertUnwindSafe(source.fetch_detail(&id))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(interrupted(DETAIL_FALLBACK_MESSAGE)));
            Completion::Detail { token, result }
        });
    }

    /// The user dismissed the detail.
    pub fn close_detail(&mut self) {
        self.view.close_detail();
    }

    /// Wait for the next fetch to finish and apply it.
    ///
    /// Returns `None` when nothing is in flight. There is no timeout here; a
    /// hung request keeps this pending until the source gives up.
    pub async fn next_completion(&mut self) -> Option<Outcome> {
        let completion = match self.tasks.join_next().await? {
            Ok(completion) => completion,
            Err(e) => {
                // Panics are caught inside each task and nothing here aborts
                // tasks, so this is only reachable during runtime shutdown.
                error!(error = %e, "fetch task ended without a result");
                return Some(Outcome::Discarded);
            }
        };

        Some(match completion {
            Completion::List { token, result } => self.view.finish_list(token, result),
            Completion::Detail { token, result } => self.view.finish_detail(token, result),
        })
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn fetch_list(&mut self) {
        let token = self.view.begin_list();
        debug!(?token, city = %self.query.starting_city, "fetching destinations");

        let source = Arc::clone(&self.source);
        let query = self.query.clone();
        self.tasks.spawn(async move {
            let result = AssertUnwindSafe(source.fetch_summaries(&query))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(interrupted(LIST_FALLBACK_MESSAGE)));
            Completion::List { token, result }
        });
    }
}

fn interrupted(fallback: &'static str) -> ClientError {
    error!(fallback, "destination source panicked");
    ClientError::Interrupted {
        fallback,
        reason: "destination source panicked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use futures::future::BoxFuture;
    use futures::{FutureExt, future};
    use serde_json::json;
    use tokio::sync::oneshot;

    use crate::discovery::StaticDestinations;
    use crate::domain::{RawQuery, keys};
    use crate::view::Phase;

    fn summary(id: &str) -> DestinationSummary {
        serde_json::from_value(json!({ "id": id, "name": id.to_uppercase() })).unwrap()
    }

    fn detail(id: &str) -> DestinationDetail {
        serde_json::from_value(json!({ "id": id, "name": id.to_uppercase() })).unwrap()
    }

    /// Source whose detail responses are released by the test.
    struct GatedSource {
        list: Mutex<Option<Result<Vec<DestinationSummary>, ClientError>>>,
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<DestinationDetail, ClientError>>>>,
    }

    impl GatedSource {
        fn new(list: Result<Vec<DestinationSummary>, ClientError>) -> Self {
            Self {
                list: Mutex::new(Some(list)),
                gates: Mutex::new(HashMap::new()),
            }
        }

        /// Register a pending detail; send on the returned handle to release it.
        fn gate(&self, id: &str) -> oneshot::Sender<Result<DestinationDetail, ClientError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(id.to_string(), rx);
            tx
        }
    }

    impl DestinationSource for GatedSource {
        fn fetch_summaries<'a>(
            &'a self,
            _query: &'a CanonicalQuery,
        ) -> BoxFuture<'a, Result<Vec<DestinationSummary>, ClientError>> {
            let result = self
                .list
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()));
            future::ready(result).boxed()
        }

        fn fetch_detail<'a>(
            &'a self,
            id: &'a DestinationId,
        ) -> BoxFuture<'a, Result<DestinationDetail, ClientError>> {
            let gate = self.gates.lock().unwrap().remove(id.as_str());
            async move {
                match gate {
                    Some(rx) => rx.await.unwrap_or(Err(ClientError::Status { status: 499 })),
                    None => Err(ClientError::Status { status: 404 }),
                }
            }
            .boxed()
        }
    }

    fn open_name(session: &ResultsSession) -> Option<String> {
        session.state().selected_detail.as_ref().map(|p| p.name.clone())
    }

    #[tokio::test]
    async fn mount_loads_list() {
        let source = Arc::new(GatedSource::new(Ok(vec![summary("a"), summary("b")])));
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());

        assert_eq!(session.state().phase, Phase::Loading);
        session.settle().await;

        assert_eq!(session.state().phase, Phase::Ready);
        assert_eq!(session.state().summaries.len(), 2);
        assert_eq!(session.pending(), 0);
    }

    #[tokio::test]
    async fn failed_mount_shows_error_screen() {
        let source = Arc::new(GatedSource::new(Err(ClientError::Application {
            message: "no results".into(),
        })));
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        assert!(session.state().shows_error_screen());
        assert_eq!(session.state().error_message.as_deref(), Some("no results"));
    }

    #[tokio::test]
    async fn selection_opens_detail() {
        let source = Arc::new(GatedSource::new(Ok(vec![summary("a")])));
        let release = source.gate("a");
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        session.select(DestinationId::new("a"));
        release.send(Ok(detail("a"))).unwrap();
        assert_eq!(session.next_completion().await, Some(Outcome::Applied));

        assert!(session.state().detail_open);
        assert_eq!(open_name(&session).as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn earlier_selection_never_wins() {
        let source = Arc::new(GatedSource::new(Ok(vec![summary("a"), summary("b")])));
        let release_a = source.gate("a");
        let release_b = source.gate("b");
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        session.select(DestinationId::new("a"));
        session.select(DestinationId::new("b"));

        release_b.send(Ok(detail("b"))).unwrap();
        assert_eq!(session.next_completion().await, Some(Outcome::Applied));
        assert_eq!(open_name(&session).as_deref(), Some("B"));

        release_a.send(Ok(detail("a"))).unwrap();
        assert_eq!(session.next_completion().await, Some(Outcome::Discarded));
        assert_eq!(open_name(&session).as_deref(), Some("B"));
        assert_eq!(session.pending(), 0);
    }

    #[tokio::test]
    async fn earlier_selection_arriving_first_is_ignored() {
        let source = Arc::new(GatedSource::new(Ok(vec![summary("a"), summary("b")])));
        let release_a = source.gate("a");
        let release_b = source.gate("b");
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        session.select(DestinationId::new("a"));
        session.select(DestinationId::new("b"));

        release_a.send(Ok(detail("a"))).unwrap();
        assert_eq!(session.next_completion().await, Some(Outcome::Discarded));
        assert!(!session.state().detail_open);

        release_b.send(Ok(detail("b"))).unwrap();
        session.settle().await;
        assert_eq!(open_name(&session).as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn close_before_response_stays_closed() {
        let source = Arc::new(GatedSource::new(Ok(vec![summary("a")])));
        let release = source.gate("a");
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        session.select(DestinationId::new("a"));
        session.close_detail();
        release.send(Ok(detail("a"))).unwrap();
        session.settle().await;

        assert!(!session.state().detail_open);
        assert!(session.state().selected_detail.is_none());
    }

    #[tokio::test]
    async fn detail_error_keeps_list() {
        let source = Arc::new(GatedSource::new(Ok(vec![summary("a")])));
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        // No gate registered: the source answers 404.
        session.select(DestinationId::new("missing"));
        session.settle().await;

        assert!(!session.state().detail_open);
        assert_eq!(session.state().phase, Phase::Ready);
        assert_eq!(session.state().summaries.len(), 1);
        assert!(session.state().detail_error.is_some());
    }

    #[tokio::test]
    async fn nothing_pending_returns_none() {
        let source = Arc::new(GatedSource::new(Ok(Vec::new())));
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        assert!(session.next_completion().now_or_never().flatten().is_none());
    }

    #[tokio::test]
    async fn unchanged_query_does_not_refetch() {
        let source = Arc::new(StaticDestinations::from_file("data/sample_destinations.json").unwrap());
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;

        assert!(!session.query_changed(CanonicalQuery::default()));
        assert_eq!(session.pending(), 0);

        let lisbon = CanonicalQuery::from_raw(&RawQuery::new().with(keys::STARTING_CITY, "Lisbon"));
        assert!(session.query_changed(lisbon));
        assert_eq!(session.pending(), 1);
        assert_eq!(session.query().starting_city, "Lisbon");

        session.settle().await;
        assert_eq!(session.state().summaries.len(), 5);
    }

    /// Source that panics on every call.
    struct PanickingSource;

    impl DestinationSource for PanickingSource {
        fn fetch_summaries<'a>(
            &'a self,
            _query: &'a CanonicalQuery,
        ) -> BoxFuture<'a, Result<Vec<DestinationSummary>, ClientError>> {
            async { panic!("list exploded") }.boxed()
        }

        fn fetch_detail<'a>(
            &'a self,
            _id: &'a DestinationId,
        ) -> BoxFuture<'a, Result<DestinationDetail, ClientError>> {
            async { panic!("detail exploded") }.boxed()
        }
    }

    #[tokio::test]
    async fn panicking_source_records_errors() {
        let mut session = ResultsSession::mount(Arc::new(PanickingSource), CanonicalQuery::default());
        session.select(DestinationId::new("a"));

        tokio::time::timeout(std::time::Duration::from_secs(5), session.settle())
            .await
            .expect("settle should finish");

        assert!(session.state().shows_error_screen());
        assert_eq!(
            session.state().error_message.as_deref(),
            Some(crate::discovery::LIST_FALLBACK_MESSAGE)
        );
        assert_eq!(
            session.state().detail_error.as_deref(),
            Some(crate::discovery::DETAIL_FALLBACK_MESSAGE)
        );
        assert!(!session.state().detail_open);
        assert_eq!(session.pending(), 0);
    }

    /// Source whose detail never answers; reports when its future is dropped.
    struct HangingSource {
        dropped: Mutex<Option<oneshot::Sender<()>>>,
    }

    impl DestinationSource for HangingSource {
        fn fetch_summaries<'a>(
            &'a self,
            _query: &'a CanonicalQuery,
        ) -> BoxFuture<'a, Result<Vec<DestinationSummary>, ClientError>> {
            future::ready(Ok(Vec::new())).boxed()
        }

        fn fetch_detail<'a>(
            &'a self,
            _id: &'a DestinationId,
        ) -> BoxFuture<'a, Result<DestinationDetail, ClientError>> {
            let guard = self.dropped.lock().unwrap().take();
            async move {
                let _guard = guard;
                future::pending::<Result<DestinationDetail, ClientError>>().await
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn dropping_session_aborts_fetches() {
        let (tx, rx) = oneshot::channel();
        let source = Arc::new(HangingSource {
            dropped: Mutex::new(Some(tx)),
        });
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.select(DestinationId::new("a"));
        assert_eq!(session.next_completion().await, Some(Outcome::Applied));
        assert_eq!(session.pending(), 1);

        drop(session);

        // The sender lives in the aborted task, so the receiver sees it dropped.
        let closed = tokio::time::timeout(std::time::Duration::from_secs(5), rx).await;
        assert!(matches!(closed, Ok(Err(_))));
    }

    #[tokio::test]
    async fn retry_recovers_from_error() {
        let source = Arc::new(GatedSource::new(Err(ClientError::Status { status: 503 })));
        let mut session = ResultsSession::mount(source, CanonicalQuery::default());
        session.settle().await;
        assert!(session.state().shows_error_screen());

        // The gated source answers an empty list once its scripted failure is used.
        session.retry();
        session.settle().await;
        assert_eq!(session.state().phase, Phase::Ready);
        assert!(session.state().error_message.is_none());
    }
}
