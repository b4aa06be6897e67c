//! Backlink retrieval: query building, the remote call, record normalization
//! and failure classification.
//!
//! # Architecture
//!
//! - [`LinksQuery`] - Parameters of one `POST /api/links` call
//! - [`LinksTransport`] - Async trait the HTTP client implements; swap it for a test double
//! - [`LinksService`] - Issues the call and turns the response into a [`RetrievalResult`]
//! - [`classify_failure`] - Maps non-2xx responses to a [`RetrievalFailure`]
//! - [`Backlink`] - Normalized record with camelCase field names
//!
//! # Example
//!
//! ```no_run
//! use backlinks_core::{ApiClient, LinksQuery, LinksService, RetrievalResult, SortOrder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = LinksService::new(ApiClient::new("http://localhost:8010")?);
//! let query = LinksQuery::new("example.com", 1, 20)?
//!     .with_sort("qty")
//!     .with_order(SortOrder::Descending);
//!
//! match service.fetch_links(&query).await? {
//!     RetrievalResult::Success(records) => println!("{} backlinks", records.len()),
//!     RetrievalResult::Failure(failure) => eprintln!("{failure}"),
//! }
//! # Ok(())
//! # }
//! ```

mod classify;
mod error;
mod query;
mod record;
mod transport;

pub use classify::{GENERIC_ERROR_MESSAGE, RATE_LIMIT_MESSAGE, RetrievalFailure, classify_failure};
pub use error::{QueryError, TransportError};
pub use query::{LinksQuery, ParseSortOrderError, SortOrder};
pub use record::{BACKLINK_WIRE_FIELDS, Backlink, Filter};
pub use transport::{LinksTransport, RawResponse};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Path of the links endpoint under the API base address.
pub const LINKS_PATH: &str = "/api/links";

/// Outcome of one retrieval.
///
/// An empty `Success` means the domain has no backlinks on that page; it is
/// not an error. Serializes as the record array on success and as
/// `{ "error": message }` on failure.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalResult {
    /// Records in the order the server returned them.
    Success(Vec<Backlink>),
    /// The server answered with a non-2xx status.
    Failure(RetrievalFailure),
}

impl RetrievalResult {
    /// Converts into a standard `Result` for `?`-style handling.
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the retrieval did not succeed.
    pub fn into_result(self) -> Result<Vec<Backlink>, RetrievalFailure> {
        match self {
            Self::Success(records) => Ok(records),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl Serialize for RetrievalResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(records) => records.serialize(serializer),
            Self::Failure(failure) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", failure.message())?;
                map.end()
            }
        }
    }
}

/// Entry point for fetching backlink records.
///
/// Holds the transport for its whole lifetime and keeps no other state, so a
/// single service can be shared across tasks. Overlapping calls are not
/// sequenced: responses resolve in arrival order and stale pages are not
/// cancelled.
#[derive(Debug, Clone)]
pub struct LinksService<T> {
    transport: T,
}

impl<T: LinksTransport> LinksService<T> {
    /// Creates a service that sends every request through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches one page of backlinks.
    ///
    /// Issues exactly one request; there is no retry, caching or
    /// de-duplication. Non-2xx responses are classified and returned as
    /// [`RetrievalResult::Failure`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request never completed or a 2xx
    /// body is not a JSON array of backlink objects.
    #[instrument(
        skip(self, query),
        fields(domain = %query.domain(), page = query.page(), limit = query.limit())
    )]
    pub async fn fetch_links(&self, query: &LinksQuery) -> Result<RetrievalResult, TransportError> {
        debug!(
            sort = ?query.sort(),
            order = ?query.order(),
            filters = query.filters().map_or(0, <[Filter]>::len),
            "requesting backlinks"
        );

        let response = self.transport.post(LINKS_PATH, query).await?;

        if !response.is_success() {
            let failure = classify_failure(response.status, &response.body);
            warn!(
                status = response.status,
                kind = failure.kind(),
                "links request failed"
            );
            return Ok(RetrievalResult::Failure(failure));
        }

        let records = decode_records(&response.url, &response.body)?;
        debug!(count = records.len(), "backlinks received");
        Ok(RetrievalResult::Success(records))
    }
}

fn decode_records(url: &str, body: &[u8]) -> Result<Vec<Backlink>, TransportError> {
    let elements: Vec<Value> =
        serde_json::from_slice(body).map_err(|e| TransportError::malformed_body(url, e))?;

    elements
        .into_iter()
        .map(Backlink::from_wire)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TransportError::malformed_body(url, e))
}
