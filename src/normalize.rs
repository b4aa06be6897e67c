//! Wire key normalization.
//!
//! The links API answers with snake_case (`link_url`) or kebab-case
//! (`date-from`) keys. Everything downstream of the retrieval layer uses
//! camelCase, so each record's top-level keys are rewritten before the record
//! is decoded into a [`Backlink`](crate::Backlink).

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

/// A separator followed by the lowercase letter that will be uppercased.
#[allow(clippy::expect_used)]
static SEPARATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_]([a-z])").expect("separator regex is valid") // Static pattern, safe to panic
});

/// Converts a single snake_case or kebab-case key to camelCase.
///
/// Every `_` or `-` immediately followed by an ASCII lowercase letter is
/// dropped and the letter uppercased. Separators before digits, uppercase
/// letters or the end of the key are kept.
///
/// # Examples
///
/// ```
/// use backlinks_core::normalize::to_camel_case;
///
/// assert_eq!(to_camel_case("link_url"), "linkUrl");
/// assert_eq!(to_camel_case("date-from"), "dateFrom");
/// assert_eq!(to_camel_case("linkUrl"), "linkUrl");
/// ```
#[must_use]
pub fn to_camel_case(key: &str) -> String {
    SEPARATOR_PATTERN
        .replace_all(key, |caps: &Captures<'_>| caps[1].to_ascii_uppercase())
        .into_owned()
}

/// Rewrites the top-level keys of a wire record to camelCase.
///
/// Values are moved across untouched and nested objects keep their keys.
/// When two wire keys collapse onto the same camelCase key the one visited
/// last wins.
#[must_use]
pub fn normalize_keys(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| (to_camel_case(&key), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::links::BACKLINK_WIRE_FIELDS;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_to_camel_case_snake() {
        assert_eq!(to_camel_case("link_url"), "linkUrl");
        assert_eq!(to_camel_case("link_text_short"), "linkTextShort");
    }

    #[test]
    fn test_to_camel_case_kebab() {
        assert_eq!(to_camel_case("date-from"), "dateFrom");
        assert_eq!(to_camel_case("page-url-short"), "pageUrlShort");
    }

    #[test]
    fn test_to_camel_case_mixed_separators() {
        assert_eq!(to_camel_case("ip_string-value"), "ipStringValue");
    }

    #[test]
    fn test_to_camel_case_leaves_non_lowercase_followers() {
        assert_eq!(to_camel_case("page_2"), "page_2");
        assert_eq!(to_camel_case("link_Url"), "link_Url");
        assert_eq!(to_camel_case("trailing_"), "trailing_");
        assert_eq!(to_camel_case("_private"), "Private");
    }

    #[test]
    fn test_to_camel_case_double_separator_keeps_first() {
        assert_eq!(to_camel_case("link__url"), "link_Url");
    }

    #[test]
    fn test_to_camel_case_plain_key_unchanged() {
        assert_eq!(to_camel_case("qty"), "qty");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_normalize_keys_rewrites_top_level_only() {
        let record = object(json!({
            "link_url": "https://a.com/post",
            "date-from": "2024-01-01",
            "meta_data": { "inner_key": 1 }
        }));

        let normalized = normalize_keys(record);

        assert_eq!(normalized["linkUrl"], json!("https://a.com/post"));
        assert_eq!(normalized["dateFrom"], json!("2024-01-01"));
        assert_eq!(normalized["metaData"], json!({ "inner_key": 1 }));
        assert_eq!(normalized.len(), 3);
    }

    #[test]
    fn test_normalize_keys_passes_values_through() {
        let record = object(json!({
            "no_follow": 1,
            "ip": ["10.0.0.1", "10.0.0.2"],
            "qty": "7"
        }));

        let normalized = normalize_keys(record);

        assert_eq!(normalized["noFollow"], json!(1));
        assert_eq!(normalized["ip"], json!(["10.0.0.1", "10.0.0.2"]));
        assert_eq!(normalized["qty"], json!("7"), "values must not be coerced");
    }

    #[test]
    fn test_normalize_keys_is_noop_on_camel_case() {
        let record = object(json!({
            "linkUrl": "a.com",
            "pageUrlShort": "b.com/…",
            "qty": 3
        }));

        let normalized = normalize_keys(record.clone());

        assert_eq!(normalized, record);
        assert_eq!(normalize_keys(normalized.clone()), normalized);
    }

    #[test]
    fn test_backlink_wire_fields_normalize_to_schema_names() {
        for (wire, internal) in BACKLINK_WIRE_FIELDS {
            assert_eq!(to_camel_case(wire), internal, "snake wire name {wire}");
            let kebab = wire.replace('_', "-");
            assert_eq!(to_camel_case(&kebab), internal, "kebab wire name {kebab}");
        }
    }
}
