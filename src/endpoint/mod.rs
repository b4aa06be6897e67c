//! Base address resolution for the links API.
//!
//! The base address comes from the first non-empty tier:
//! 1. a runtime override supplied by the deployment environment,
//! 2. `BACKLINKS_API_BASE_URL` captured at build time,
//! 3. [`FALLBACK_API_BASE_URL`].
//!
//! Resolution never fails. Validation of the chosen address happens when the
//! [`ApiClient`] is built from it.

mod http_client;

pub use http_client::{ApiClient, ClientOptions};

use tracing::info;

/// Address used when neither a runtime nor a build-time value is present.
pub const FALLBACK_API_BASE_URL: &str = "http://localhost:8010";

/// Environment variable holding the base address, read at build time and at run time.
pub const API_BASE_URL_ENV: &str = "BACKLINKS_API_BASE_URL";

const BUILD_TIME_API_BASE_URL: Option<&str> = option_env!("BACKLINKS_API_BASE_URL");

/// Which tier supplied the resolved base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    /// Injected by the deployment environment after the binary was built.
    Runtime,
    /// Embedded when the binary was compiled.
    BuildTime,
    /// Hardcoded default.
    Fallback,
}

/// A base address together with the tier it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub base_url: String,
    pub source: EndpointSource,
}

/// Resolves the API base address, preferring `runtime` when it is non-empty.
///
/// Emits one `info` event with the chosen address and its source.
///
/// # Examples
///
/// ```
/// use backlinks_core::endpoint::{EndpointSource, resolve_base_url};
///
/// let endpoint = resolve_base_url(Some("https://links.example.net"));
/// assert_eq!(endpoint.base_url, "https://links.example.net");
/// assert_eq!(endpoint.source, EndpointSource::Runtime);
/// ```
#[must_use]
pub fn resolve_base_url(runtime: Option<&str>) -> ResolvedEndpoint {
    let endpoint = resolve_with_build_default(runtime, BUILD_TIME_API_BASE_URL);
    info!(
        base_url = %endpoint.base_url,
        source = ?endpoint.source,
        "API base URL resolved"
    );
    endpoint
}

fn resolve_with_build_default(runtime: Option<&str>, build_time: Option<&str>) -> ResolvedEndpoint {
    if let Some(base_url) = non_empty(runtime) {
        return ResolvedEndpoint {
            base_url,
            source: EndpointSource::Runtime,
        };
    }
    if let Some(base_url) = non_empty(build_time) {
        return ResolvedEndpoint {
            base_url,
            source: EndpointSource::BuildTime,
        };
    }
    ResolvedEndpoint {
        base_url: FALLBACK_API_BASE_URL.to_string(),
        source: EndpointSource::Fallback,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_value_wins() {
        let endpoint =
            resolve_with_build_default(Some("https://runtime.example"), Some("https://build.example"));
        assert_eq!(endpoint.base_url, "https://runtime.example");
        assert_eq!(endpoint.source, EndpointSource::Runtime);
    }

    #[test]
    fn test_build_time_used_without_runtime() {
        let endpoint = resolve_with_build_default(None, Some("https://build.example"));
        assert_eq!(endpoint.base_url, "https://build.example");
        assert_eq!(endpoint.source, EndpointSource::BuildTime);
    }

    #[test]
    fn test_fallback_used_when_nothing_set() {
        let endpoint = resolve_with_build_default(None, None);
        assert_eq!(endpoint.base_url, "http://localhost:8010");
        assert_eq!(endpoint.source, EndpointSource::Fallback);
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let endpoint = resolve_with_build_default(Some(""), Some("   "));
        assert_eq!(endpoint.source, EndpointSource::Fallback);

        let endpoint = resolve_with_build_default(Some("  "), Some("https://build.example"));
        assert_eq!(endpoint.source, EndpointSource::BuildTime);
    }

    #[test]
    fn test_values_are_trimmed() {
        let endpoint = resolve_with_build_default(Some(" https://runtime.example\n"), None);
        assert_eq!(endpoint.base_url, "https://runtime.example");
    }

    #[test]
    fn test_resolve_base_url_prefers_runtime() {
        let endpoint = resolve_base_url(Some("https://runtime.example"));
        assert_eq!(endpoint.source, EndpointSource::Runtime);
    }
}
