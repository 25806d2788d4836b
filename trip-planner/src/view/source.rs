//! Where the results view gets its data.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::discovery::{ClientError, DiscoveryClient, StaticDestinations};
use crate::domain::{CanonicalQuery, DestinationDetail, DestinationId, DestinationSummary};

/// Trait for providing destination data.
///
/// This abstraction lets the view run against the live service, the
/// fixture-backed stand-in, or a test double.
pub trait DestinationSource: Send + Sync {
    /// The top destinations for a query, in ranked order.
    fn fetch_summaries<'a>(
        &'a self,
        query: &'a CanonicalQuery,
    ) -> BoxFuture<'a, Result<Vec<DestinationSummary>, ClientError>>;

    /// The full record for one destination.
    fn fetch_detail<'a>(
        &'a self,
        id: &'a DestinationId,
    ) -> BoxFuture<'a, Result<DestinationDetail, ClientError>>;
}

impl DestinationSource for DiscoveryClient {
    fn fetch_summaries<'a>(
        &'a self,
        query: &'a CanonicalQuery,
    ) -> BoxFuture<'a, Result<Vec<DestinationSummary>, ClientError>> {
        DiscoveryClient::fetch_summaries(self, query).boxed()
    }

    fn fetch_detail<'a>(
        &'a self,
        id: &'a DestinationId,
    ) -> BoxFuture<'a, Result<DestinationDetail, ClientError>> {
        DiscoveryClient::fetch_detail(self, id).boxed()
    }
}

impl DestinationSource for StaticDestinations {
    fn fetch_summaries<'a>(
        &'a self,
        query: &'a CanonicalQuery,
    ) -> BoxFuture<'a, Result<Vec<DestinationSummary>, ClientError>> {
        StaticDestinations::fetch_summaries(self, query).boxed()
    }

    fn fetch_detail<'a>(
        &'a self,
        id: &'a DestinationId,
    ) -> BoxFuture<'a, Result<DestinationDetail, ClientError>> {
        StaticDestinations::fetch_detail(self, id).boxed()
    }
}
