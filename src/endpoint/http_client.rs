//! Shared HTTP client bound to the links API base address.
//!
//! One [`ApiClient`] is built at start-up and reused for every call. Cloning it
//! is cheap and shares the connection pool.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::links::{LinksQuery, LinksTransport, RawResponse, TransportError};
use crate::user_agent;

/// Optional client settings. The default sets no request timeout, leaving
/// reqwest's own defaults in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Total per-request timeout.
    pub timeout: Option<Duration>,
}

/// HTTP client sending JSON requests to a fixed base address.
///
/// Every request carries `Content-Type: application/json`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute http(s) URL or carries a query string or fragment, or
    /// [`TransportError::ClientBuild`] when the underlying client cannot be
    /// initialised.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Creates a client for `base_url` with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    #[instrument(level = "debug", skip(options))]
    pub fn with_options(base_url: &str, options: ClientOptions) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|_| TransportError::invalid_base_url(base_url))?;
        if !matches!(parsed.scheme(), "http" | "https")
            || parsed.cannot_be_a_base()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
        {
            return Err(TransportError::invalid_base_url(base_url));
        }

        let client = build_client(options).map_err(|source| TransportError::ClientBuild { source })?;
        debug!(timeout = ?options.timeout, "API client built");

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base address without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base address, keeping any base path prefix.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn build_client(options: ClientOptions) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut builder = Client::builder()
        .default_headers(headers)
        .user_agent(user_agent::default_user_agent())
        .gzip(true);
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

#[async_trait]
impl LinksTransport for ApiClient {
    #[instrument(level = "debug", skip(self, query))]
    async fn post(&self, path: &str, query: &LinksQuery) -> Result<RawResponse, TransportError> {
        let url = self.url_for(path);

        let response = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;
        trace!(status, bytes = body.len(), "links response received");

        Ok(RawResponse {
            url,
            status,
            body: body.to_vec(),
        })
    }
}
