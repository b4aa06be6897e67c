//! Error types for the links retrieval module.
//!
//! Only failures that fall outside the "well-formed HTTP error" contract live
//! here. Non-2xx responses are classified into a
//! [`RetrievalFailure`](super::RetrievalFailure) and never surface as errors.

use thiserror::Error;

/// Errors raised when a links request never produced a usable response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The success response body was not a JSON array of backlink objects.
    #[error("malformed response body from {url}: {source}")]
    MalformedBody {
        /// The URL that returned the body.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The configured base address is not an absolute http(s) URL without query or fragment.
    #[error("invalid API base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected base address.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a malformed body error.
    pub fn malformed_body(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedBody {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>) -> Self {
        Self::InvalidBaseUrl { url: url.into() }
    }

    /// Maps a reqwest send/read error to a timeout or network error.
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }
}

/// Errors raised when a [`LinksQuery`](super::LinksQuery) is constructed with
/// out-of-range paging values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Page numbers start at 1.
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),

    /// At least one record must be requested per page.
    #[error("limit must be at least 1, got {0}")]
    InvalidLimit(u32),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_includes_url() {
        let error = TransportError::timeout("http://localhost:8010/api/links");
        assert_eq!(
            error.to_string(),
            "timeout requesting http://localhost:8010/api/links"
        );
    }

    #[test]
    fn test_malformed_body_keeps_json_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = TransportError::malformed_body("http://api/api/links", source);
        assert!(error.to_string().starts_with("malformed response body from http://api/api/links"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_query_error_messages() {
        assert_eq!(QueryError::InvalidPage(0).to_string(), "page must be at least 1, got 0");
        assert_eq!(QueryError::InvalidLimit(0).to_string(), "limit must be at least 1, got 0");
    }
}
