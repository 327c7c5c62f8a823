//! Fuzzy field classification for a single JSON object node.
//!
//! Each field (platform, symbol, rate) is first looked up among the node's
//! own scalar fields, then through a fallback (path segments for the
//! platform, one nesting level down for symbol and rate). Nothing here
//! fails: a node that does not look like a funding record simply yields an
//! empty [`Candidate`].

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::normalize::{base_from_symbol, coerce_rate};
use super::platform::resolve_platform;
use crate::types::{FundingRecord, Platform};

const PLATFORM_KEYS: &[&str] = &[
    "platform",
    "exchange",
    "venue",
    "source",
    "provider",
    "dex",
    "market_provider",
];

const SYMBOL_KEYS: &[&str] = &[
    "symbol", "market", "pair", "name", "base", "asset", "coin", "ticker",
];

const RATE_KEYS: &[&str] = &[
    "funding_rate",
    "fundingrate",
    "hourlyfundingrate",
    "predictedfundingrate",
    "rate",
    "value",
];

fn matches_any(key: &str, names: &[&str]) -> bool {
    let key = key.to_lowercase();
    names.iter().any(|name| key.contains(name))
}

/// Key looks like it names a venue.
pub fn is_platform_key(key: &str) -> bool {
    matches_any(key, PLATFORM_KEYS)
}

/// Key looks like it names a market or asset.
pub fn is_symbol_key(key: &str) -> bool {
    matches_any(key, SYMBOL_KEYS)
}

/// Key looks like it holds a funding rate.
///
/// Besides the explicit names, anything mentioning "fund" qualifies unless it
/// is an index or a timestamp (`fundingIndex`, `nextFundingTime`).
pub fn is_rate_key(key: &str) -> bool {
    if matches_any(key, RATE_KEYS) {
        return true;
    }
    let key = key.to_lowercase();
    key.contains("fund") && !key.contains("index") && !key.contains("time")
}

/// Partially identified funding record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub platform: Option<Platform>,
    /// Canonical base asset, present only if a non-empty symbol was found
    pub base: Option<String>,
    pub rate: Option<Decimal>,
}

impl Candidate {
    /// Promote to a record if every field was found and the venue is accepted.
    pub fn into_record(self, accept: impl Fn(Platform) -> bool) -> Option<FundingRecord> {
        let platform = self.platform.filter(|p| accept(*p))?;
        let base = self.base.filter(|b| !b.is_empty())?;
        let rate = self.rate?;
        Some(FundingRecord::new(platform, &base, rate))
    }

    /// Whether a symbol or rate was found, regardless of the platform.
    pub fn has_payload(&self) -> bool {
        self.base.is_some() || self.rate.is_some()
    }
}

/// Try to pull a (platform, base, rate) triple out of one object node.
pub fn extract_candidate(node: &Map<String, Value>, path: &[String]) -> Candidate {
    let platform = direct_platform(node).or_else(|| platform_from_path(path));
    let symbol = direct_symbol(node).or_else(|| nested(node, direct_symbol));
    let rate = direct_rate(node).or_else(|| nested(node, direct_rate));

    Candidate {
        platform,
        base: symbol.map(base_from_symbol),
        rate,
    }
}

fn direct_platform(node: &Map<String, Value>) -> Option<Platform> {
    node.iter()
        .filter(|(key, _)| is_platform_key(key))
        .filter_map(|(_, value)| value.as_str())
        .find_map(resolve_platform)
}

/// Deepest segment first, e.g. `["data", "hyperliquid", "3"]`.
fn platform_from_path(path: &[String]) -> Option<Platform> {
    path.iter().rev().find_map(|segment| resolve_platform(segment))
}

fn direct_symbol(node: &Map<String, Value>) -> Option<&str> {
    node.iter()
        .filter(|(key, _)| is_symbol_key(key))
        .filter_map(|(_, value)| value.as_str())
        .find(|symbol| !symbol.is_empty())
}

fn direct_rate(node: &Map<String, Value>) -> Option<Decimal> {
    node.iter()
        .filter(|(key, value)| {
            matches!(value, Value::Number(_) | Value::String(_)) && is_rate_key(key)
        })
        .find_map(|(_, value)| coerce_rate(value))
}

/// Apply `lookup` to each object-valued field, first hit wins.
fn nested<'a, T>(
    node: &'a Map<String, Value>,
    lookup: impl Fn(&'a Map<String, Value>) -> Option<T>,
) -> Option<T> {
    node.values()
        .filter_map(Value::as_object)
        .find_map(lookup)
}
