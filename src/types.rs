//! Shared domain types: venues and normalized funding records.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::extract::base_from_symbol;

/// Funding venue a rate was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Platform {
    Hyperliquid,
    Lighter,
    Paradex,
    /// Record-like node whose venue could not be determined.
    Unknown,
}

impl Platform {
    /// Venues rendered as pivot columns, in display order.
    pub const COLUMNS: [Platform; 3] = [Platform::Hyperliquid, Platform::Lighter, Platform::Paradex];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Hyperliquid => write!(f, "Hyperliquid"),
            Platform::Lighter => write!(f, "Lighter"),
            Platform::Paradex => write!(f, "Paradex"),
            Platform::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One hourly funding observation, keyed by canonical base asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingRecord {
    pub platform: Platform,
    /// Canonical upper-case base asset (e.g. "BTC")
    pub base: String,
    /// Hourly funding as a signed fraction (0.0001 = 0.01%/h)
    pub rate: Decimal,
}

impl FundingRecord {
    /// Build a record, canonicalizing `symbol` to its base asset.
    pub fn new(platform: Platform, symbol: &str, rate: Decimal) -> Self {
        Self {
            platform,
            base: base_from_symbol(symbol),
            rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_canonicalizes_symbol() {
        let record = FundingRecord::new(Platform::Paradex, "sol-usd-perp", dec!(0.0001));
        assert_eq!(record.base, "SOL");
        assert_eq!(record.platform, Platform::Paradex);
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Hyperliquid.to_string(), "Hyperliquid");
        assert_eq!(Platform::Unknown.to_string(), "Unknown");
        assert_eq!(Platform::COLUMNS.len(), 3);
    }
}
