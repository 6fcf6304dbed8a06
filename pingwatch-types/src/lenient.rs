//! Tolerant field parsing shared by the raw record types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::RecordError;

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    #[allow(dead_code)]
    Other(IgnoredAny),
}

/// Deserialize any JSON value into an optional integer.
///
/// Integral floats are accepted; strings, booleans, objects and fractional
/// numbers become `None` rather than failing the whole document.
pub(crate) fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseNumber>::deserialize(deserializer)? {
        Some(LooseNumber::Int(n)) => Some(n),
        Some(LooseNumber::Float(f)) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        _ => None,
    })
}

/// Validate a required, non-negative identifier.
pub(crate) fn id(field: &'static str, value: Option<i64>) -> Result<u64, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;
    u64::try_from(value).map_err(|_| RecordError::InvalidId { field, value })
}

/// Parse an ISO-8601 instant.
///
/// Strings without an offset are read as UTC, which is what the backend
/// emits for its naive `utcnow()` timestamps.
pub(crate) fn timestamp(field: &'static str, value: Option<&str>) -> Result<DateTime<Utc>, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RecordError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "int")]
        n: Option<i64>,
    }

    fn parse(json: &str) -> Option<i64> {
        serde_json::from_str::<Holder>(json).unwrap().n
    }

    #[test]
    fn test_int_tolerates_garbage() {
        assert_eq!(parse(r#"{"n": 200}"#), Some(200));
        assert_eq!(parse(r#"{"n": 200.0}"#), Some(200));
        assert_eq!(parse(r#"{"n": 200.5}"#), None);
        assert_eq!(parse(r#"{"n": "200"}"#), None);
        assert_eq!(parse(r#"{"n": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }

    #[test]
    fn test_id_rejects_negative() {
        assert_eq!(id("id", Some(7)), Ok(7));
        assert_eq!(id("id", None), Err(RecordError::MissingField("id")));
        assert_eq!(
            id("id", Some(-1)),
            Err(RecordError::InvalidId {
                field: "id",
                value: -1
            })
        );
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 10, 45, 23).unwrap();
        assert_eq!(timestamp("t", Some("2025-06-01T10:45:23Z")).unwrap(), expected);
        assert_eq!(timestamp("t", Some("2025-06-01T16:15:23+05:30")).unwrap(), expected);
        assert_eq!(timestamp("t", Some("2025-06-01T10:45:23")).unwrap(), expected);
        assert_eq!(timestamp("t", Some("2025-06-01 10:45:23.000")).unwrap(), expected);
        assert!(matches!(
            timestamp("t", Some("yesterday")),
            Err(RecordError::InvalidTimestamp(_))
        ));
        assert_eq!(timestamp("t", None), Err(RecordError::MissingField("t")));
    }
}
