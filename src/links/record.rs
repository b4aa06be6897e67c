//! Normalized backlink record and the filter predicate sent with queries.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::normalize::normalize_keys;

/// Snake-case wire names paired with the camelCase field they decode into.
///
/// Kebab-case variants (`link-url`) normalize to the same names.
pub const BACKLINK_WIRE_FIELDS: [(&str, &str); 12] = [
    ("link_url", "linkUrl"),
    ("page_url", "pageUrl"),
    ("link_text", "linkText"),
    ("no_follow", "noFollow"),
    ("date_from", "dateFrom"),
    ("date_to", "dateTo"),
    ("ip", "ip"),
    ("ip_string", "ipString"),
    ("qty", "qty"),
    ("link_url_short", "linkUrlShort"),
    ("page_url_short", "pageUrlShort"),
    ("link_text_short", "linkTextShort"),
];

/// One inbound link observed for a tracked domain.
///
/// Declared columns hold the server's value as-is, so a column of an
/// unexpected type or an explicit `null` survives decoding. Columns the
/// schema does not declare are kept in [`extra`](Self::extra). Absent
/// columns are skipped again on serialization. The `*_short` variants are
/// display truncations computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    /// URL of the page containing the link.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub link_url: Option<Value>,
    /// URL of the page being linked to.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub page_url: Option<Value>,
    /// Anchor text of the link.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub link_text: Option<Value>,
    /// 1 when the link carries `rel="nofollow"`, 0 otherwise.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub no_follow: Option<Value>,
    /// Start of the observation window.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<Value>,
    /// End of the observation window.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<Value>,
    /// Source IP addresses of the linking page.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ip: Option<Value>,
    /// Display-joined form of `ip`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ip_string: Option<Value>,
    /// Number of occurrences.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub qty: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub link_url_short: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub page_url_short: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub link_text_short: Option<Value>,
    /// Normalized columns outside the declared schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Backlink {
    /// Decodes one element of the wire response array.
    ///
    /// Keys are normalized to camelCase first, then the object is split into
    /// declared and extra columns. Values are never coerced or rejected.
    ///
    /// # Errors
    ///
    /// Returns a JSON error when the element is not an object.
    pub fn from_wire(value: Value) -> Result<Self, serde_json::Error> {
        let record: Map<String, Value> = serde_json::from_value(value)?;
        serde_json::from_value(Value::Object(normalize_keys(record)))
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Opaque predicate forwarded verbatim to the links API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Column the predicate applies to.
    pub name: String,
    /// Predicate operand, passed through unvalidated.
    pub val: String,
    /// Predicate kind, interpreted only by the server.
    pub kind: String,
}

impl Filter {
    /// Creates a filter from its three parts.
    pub fn new(name: impl Into<String>, val: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            val: val.into(),
            kind: kind.into(),
        }
    }
}
