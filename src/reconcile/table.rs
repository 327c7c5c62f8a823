//! Per-asset funding table.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::Platform;

/// Hourly funding by base asset, then by venue.
///
/// Bases iterate in lexical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundingTable {
    rows: BTreeMap<String, BTreeMap<Platform, Decimal>>,
}

impl FundingTable {
    /// Set the rate for (base, platform), returning any previous value.
    pub fn insert(&mut self, base: &str, platform: Platform, rate: Decimal) -> Option<Decimal> {
        self.rows
            .entry(base.to_string())
            .or_default()
            .insert(platform, rate)
    }

    pub fn ensure_asset(&mut self, base: &str) {
        self.rows.entry(base.to_string()).or_default();
    }

    pub fn get(&self, base: &str, platform: Platform) -> Option<Decimal> {
        self.rows.get(base)?.get(&platform).copied()
    }

    pub fn row(&self, base: &str) -> Option<&BTreeMap<Platform, Decimal>> {
        self.rows.get(base)
    }

    pub fn contains(&self, base: &str) -> bool {
        self.rows.contains_key(base)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<Platform, Decimal>)> {
        self.rows.iter().map(|(base, row)| (base.as_str(), row))
    }

    /// Number of rates stored for `platform` across all bases.
    pub fn platform_coverage(&self, platform: Platform) -> usize {
        self.rows
            .values()
            .filter(|row| row.contains_key(&platform))
            .count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
