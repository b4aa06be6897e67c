//! Transport seam between the retrieval service and the network.

use async_trait::async_trait;

use super::error::TransportError;
use super::query::LinksQuery;

/// A completed HTTP exchange, before any interpretation of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Absolute URL that was requested, for error context.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a links query to the remote service.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status. `Err` is reserved for exchanges that never completed.
#[async_trait]
pub trait LinksTransport: Send + Sync {
    /// POSTs `query` as a JSON body to `path` under the transport's base address.
    async fn post(&self, path: &str, query: &LinksQuery) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> RawResponse {
        RawResponse {
            url: "http://localhost:8010/api/links".to_string(),
            status,
            body: Vec::new(),
        }
    }

    #[test]
    fn test_is_success_covers_2xx_only() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(429).is_success());
        assert!(!response(500).is_success());
    }
}
