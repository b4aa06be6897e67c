//! User-Agent string sent with every links API request.

/// Default User-Agent identifying the tool and its version.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("backlinks/{version} (links-api-client)")
}
