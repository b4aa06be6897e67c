//! Classification of failed links responses into user-facing messages.
//!
//! Priority is strict and the rules never merge:
//! 1. HTTP 429 always maps to [`RetrievalFailure::RateLimited`], whatever the body says.
//! 2. A JSON body with a non-empty string `error` maps to [`RetrievalFailure::Api`].
//! 3. Anything else maps to [`RetrievalFailure::Unknown`].

use std::fmt;

use serde_json::Value;

/// Message shown when the server rate limits the caller.
pub const RATE_LIMIT_MESSAGE: &str =
    "You have reached the rate limit. Please try again in 10 minutes.";

/// Message shown when the server gave no usable explanation.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while fetching data.";

/// Status code reserved by the links API for rate limiting.
const TOO_MANY_REQUESTS: u16 = 429;

/// A failed links call, reduced to what the presentation layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalFailure {
    /// HTTP 429 from the links API.
    RateLimited,
    /// Non-2xx response carrying a structured `error` message.
    Api(String),
    /// Non-2xx response without a usable `error` field.
    Unknown,
}

impl RetrievalFailure {
    /// Returns the message to show to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::RateLimited => RATE_LIMIT_MESSAGE,
            Self::Api(message) => message,
            Self::Unknown => GENERIC_ERROR_MESSAGE,
        }
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Api(_) => "api",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RetrievalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Classifies a non-2xx response from its status code and raw body.
///
/// The body is only inspected when the status is not 429. A body that is not
/// JSON, or whose `error` is missing, empty or not a string, yields
/// [`RetrievalFailure::Unknown`].
///
/// # Examples
///
/// ```
/// use backlinks_core::{RetrievalFailure, classify_failure};
///
/// let failure = classify_failure(404, br#"{"error":"domain not found"}"#);
/// assert_eq!(failure, RetrievalFailure::Api("domain not found".to_string()));
/// ```
#[must_use]
pub fn classify_failure(status: u16, body: &[u8]) -> RetrievalFailure {
    if status == TOO_MANY_REQUESTS {
        return RetrievalFailure::RateLimited;
    }

    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or(RetrievalFailure::Unknown, |message| {
            RetrievalFailure::Api(message.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_is_rate_limited() {
        let failure = classify_failure(429, b"");
        assert_eq!(failure, RetrievalFailure::RateLimited);
        assert_eq!(failure.message(), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_429_wins_over_error_field() {
        let failure = classify_failure(429, br#"{"error":"slow down"}"#);
        assert_eq!(failure, RetrievalFailure::RateLimited);
        assert_eq!(
            failure.message(),
            "You have reached the rate limit. Please try again in 10 minutes."
        );
    }

    #[test]
    fn test_error_field_passed_through_verbatim() {
        let failure = classify_failure(404, br#"{"error":"domain not found"}"#);
        assert_eq!(failure.message(), "domain not found");
        assert_eq!(failure.kind(), "api");
    }

    #[test]
    fn test_error_field_on_server_error() {
        let failure = classify_failure(500, br#"{"error":"database unavailable","code":17}"#);
        assert_eq!(failure, RetrievalFailure::Api("database unavailable".to_string()));
    }

    #[test]
    fn test_missing_error_field_is_unknown() {
        let failure = classify_failure(500, br#"{"message":"boom"}"#);
        assert_eq!(failure, RetrievalFailure::Unknown);
        assert_eq!(failure.message(), "An error occurred while fetching data.");
    }

    #[test]
    fn test_empty_error_field_is_unknown() {
        assert_eq!(classify_failure(400, br#"{"error":""}"#), RetrievalFailure::Unknown);
    }

    #[test]
    fn test_non_string_error_field_is_unknown() {
        assert_eq!(
            classify_failure(400, br#"{"error":{"code":3}}"#),
            RetrievalFailure::Unknown
        );
        assert_eq!(classify_failure(400, br#"{"error":null}"#), RetrievalFailure::Unknown);
    }

    #[test]
    fn test_non_json_body_is_unknown() {
        assert_eq!(
            classify_failure(502, b"<html>Bad Gateway</html>"),
            RetrievalFailure::Unknown
        );
        assert_eq!(classify_failure(503, b""), RetrievalFailure::Unknown);
    }

    #[test]
    fn test_display_matches_message() {
        assert_eq!(RetrievalFailure::Unknown.to_string(), GENERIC_ERROR_MESSAGE);
        assert_eq!(RetrievalFailure::RateLimited.kind(), "rate_limited");
    }
}
