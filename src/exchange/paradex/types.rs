//! Parsing of Paradex funding history payloads.
//!
//! The endpoint has shipped several shapes over time, so fields are looked
//! up through alias lists rather than a fixed serde struct.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::extract::parse_decimal;

/// Wrapper keys that may hold the entry list.
const LIST_KEYS: &[&str] = &["data", "results", "items"];
const RATE_KEYS: &[&str] = &["funding_rate", "fundingRate", "hourly_funding_rate"];
const TIME_KEYS: &[&str] = &["timestamp", "time", "ts", "created_at", "updated_at"];

/// Epoch values above this are milliseconds.
const MILLIS_THRESHOLD: f64 = 1e12;

/// One funding history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingEntry {
    /// Hourly funding fraction as reported (no unit rescaling)
    pub rate: Decimal,
    /// Epoch seconds, if the entry carried a parseable timestamp
    pub timestamp: Option<f64>,
}

impl FundingEntry {
    /// Parse an entry; entries without a usable rate are skipped.
    pub fn from_value(item: &Value) -> Option<Self> {
        let fields = item.as_object()?;
        let rate = RATE_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(parse_decimal)?;
        let timestamp = TIME_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(parse_timestamp);

        Some(Self { rate, timestamp })
    }
}

/// Entry list of a response: a bare array, or an array under a wrapper key.
pub fn funding_entries(payload: &Value) -> Option<&[Value]> {
    let items = match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => LIST_KEYS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_array))
            .find(|items| !items.is_empty()),
        _ => None,
    }?;

    (!items.is_empty()).then_some(items.as_slice())
}

/// Epoch seconds from a number (seconds or milliseconds) or a string
/// (ISO-8601 with optional `Z`, or a numeric epoch).
pub fn parse_timestamp(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().map(epoch_seconds),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn epoch_seconds(raw: f64) -> f64 {
    if raw > MILLIS_THRESHOLD {
        raw / 1000.0
    } else {
        raw
    }
}

fn parse_timestamp_str(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(raw) = s.parse::<f64>() {
        return raw.is_finite().then(|| epoch_seconds(raw));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(micros_to_seconds(dt.timestamp_micros()));
    }
    // Naive timestamps are taken as UTC
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(micros_to_seconds(naive.and_utc().timestamp_micros()))
}

fn micros_to_seconds(micros: i64) -> f64 {
    micros as f64 / 1_000_000.0
}

/// Rate of the most recent entry in a funding history payload.
///
/// Entries without a timestamp are placed just after the latest one seen so
/// far, so declared order breaks ties. On equal timestamps the earlier entry
/// is kept.
pub fn latest_funding_rate(payload: &Value) -> Option<Decimal> {
    let mut best: Option<(f64, Decimal)> = None;

    for entry in funding_entries(payload)?.iter().filter_map(FundingEntry::from_value) {
        let best_ts = best.map_or(-1.0, |(ts, _)| ts);
        let ts = entry.timestamp.unwrap_or(best_ts + 1.0);
        if ts > best_ts {
            best = Some((ts, entry.rate));
        }
    }

    best.map(|(_, rate)| rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_latest_by_timestamp_any_order() {
        let payload = json!({"results": [
            {"funding_rate": "0.0001", "created_at": 100},
            {"funding_rate": "0.0003", "created_at": 300},
            {"funding_rate": "0.0002", "created_at": 200}
        ]});
        assert_eq!(latest_funding_rate(&payload), Some(dec!(0.0003)));

        let payload = json!([
            {"fundingRate": 0.0003, "timestamp": 300},
            {"fundingRate": 0.0002, "timestamp": 200},
            {"fundingRate": 0.0001, "timestamp": 100}
        ]);
        assert_eq!(latest_funding_rate(&payload), Some(dec!(0.0003)));
    }

    #[test]
    fn test_mixed_timestamp_encodings() {
        let payload = json!({"data": [
            {"funding_rate": "0.0001", "time": "2024-05-01T00:00:00Z"},
            // 2024-05-01T01:00:00Z in milliseconds
            {"funding_rate": "0.0002", "ts": 1714525200000u64},
            {"funding_rate": "0.0003", "updated_at": "2024-04-30T23:00:00+00:00"}
        ]});
        assert_eq!(latest_funding_rate(&payload), Some(dec!(0.0002)));
    }

    #[test]
    fn test_missing_timestamps_follow_declared_order() {
        let payload = json!([
            {"funding_rate": "0.0001"},
            {"funding_rate": "0.0002"},
            {"funding_rate": "0.0003"}
        ]);
        assert_eq!(latest_funding_rate(&payload), Some(dec!(0.0003)));
    }

    #[test]
    fn test_equal_timestamps_keep_first() {
        let payload = json!([
            {"funding_rate": "0.0001", "timestamp": 50},
            {"funding_rate": "0.0009", "timestamp": 50}
        ]);
        assert_eq!(latest_funding_rate(&payload), Some(dec!(0.0001)));
    }

    #[test]
    fn test_entries_without_rate_are_skipped() {
        let payload = json!({"results": [
            {"funding_rate": "abc", "created_at": 999},
            {"funding_rate": null, "hourly_funding_rate": "-0.00004", "created_at": 10},
            "garbage"
        ]});
        assert_eq!(latest_funding_rate(&payload), Some(dec!(-0.00004)));
    }

    #[test]
    fn test_wrapper_keys() {
        let payload = json!({"data": [], "items": [{"funding_rate": 0.001}]});
        assert_eq!(latest_funding_rate(&payload), Some(dec!(0.001)));

        assert_eq!(latest_funding_rate(&json!({"results": []})), None);
        assert_eq!(latest_funding_rate(&json!({"error": "unknown market"})), None);
        assert_eq!(latest_funding_rate(&json!("nope")), None);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp(&json!(1_700_000_000)), Some(1_700_000_000.0));
        assert_eq!(parse_timestamp(&json!(1_700_000_000_500i64)), Some(1_700_000_000.5));
        assert_eq!(
            parse_timestamp(&json!("2023-11-14T22:13:20Z")),
            Some(1_700_000_000.0)
        );
        assert_eq!(
            parse_timestamp(&json!("2023-11-14T22:13:20")),
            Some(1_700_000_000.0)
        );
        assert_eq!(parse_timestamp(&json!("1700000000")), Some(1_700_000_000.0));
        assert_eq!(parse_timestamp(&json!("yesterday")), None);
        assert_eq!(parse_timestamp(&json!(null)), None);
    }
}
