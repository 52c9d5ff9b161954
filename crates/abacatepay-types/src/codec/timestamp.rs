//! ISO-8601 timestamps.
//!
//! The API sends timestamps as RFC 3339 strings (`"2024-11-04T18:38:28.573Z"`)
//! and may omit them or send `null`. Absence always decodes to `None`, never to
//! "now" or the epoch.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::DecodeError;

/// Parses an optional ISO-8601 string.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedTimestamp`] for a non-null string that is not
/// a valid RFC 3339 date-time with offset.
pub fn decode(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, DecodeError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|e| DecodeError::MalformedTimestamp {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Serializes to RFC 3339 in UTC (`Z` suffix).
///
/// Fractional seconds are written with the shortest exact precision, so a
/// decoded wire value encodes back to the same string.
pub fn encode(value: Option<&DateTime<Utc>>) -> Option<String> {
    value.map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Decodes an arbitrary JSON value: `null` is "no value", strings are parsed,
/// anything else is malformed.
pub fn decode_value(raw: &Value) -> Result<Option<DateTime<Utc>>, DecodeError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) => decode(Some(s)),
        other => Err(DecodeError::MalformedTimestamp {
            value: other.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

/// Serde adaptor for `Option<DateTime<Utc>>` fields.
///
/// Use as `#[serde(default, with = "crate::codec::timestamp::option")]`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match super::encode(value.as_ref()) {
            Some(s) => serializer.serialize_str(&s),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        super::decode_value(&raw).map_err(serde::de::Error::custom)
    }
}
