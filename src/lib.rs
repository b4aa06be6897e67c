//! Backlinks Core Library
//!
//! This library fetches paginated, sortable, filterable lists of backlink
//! records (inbound links to a domain) from a remote links API and hands them
//! to callers in a uniform shape.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`endpoint`] - Base address resolution and the shared HTTP client
//! - [`normalize`] - snake/kebab-case to camelCase key rewriting
//! - [`links`] - Query building, retrieval service and failure classification

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod endpoint;
pub mod links;
pub mod normalize;
mod user_agent;

// Re-export commonly used types
pub use endpoint::{
    API_BASE_URL_ENV, ApiClient, ClientOptions, EndpointSource, FALLBACK_API_BASE_URL,
    ResolvedEndpoint, resolve_base_url,
};
pub use links::{
    Backlink, Filter, LINKS_PATH, LinksQuery, LinksService, LinksTransport, QueryError,
    RawResponse, RetrievalFailure, RetrievalResult, SortOrder, TransportError, classify_failure,
};
pub use normalize::{normalize_keys, to_camel_case};
