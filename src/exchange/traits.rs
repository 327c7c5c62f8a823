//! Venue-agnostic traits for funding data providers.
//!
//! The aggregator covers Hyperliquid and Lighter in bulk; venues without a
//! bulk listing implement [`MarketFundingSource`] and are probed one market
//! at a time.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::errors::ProbeError;
use crate::types::Platform;

/// A venue that can report the latest funding rate of a single market.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketFundingSource: Send + Sync {
    /// Returns the venue identifier.
    fn venue(&self) -> Platform;

    /// Latest hourly funding fraction for `market` (e.g. "BTC-USD-PERP").
    ///
    /// `ProbeError::NotFound` means the venue does not list the market.
    async fn latest_funding(&self, market: &str) -> Result<Decimal, ProbeError>;
}

/// Market identifier used by perp venues keyed as `{BASE}-{QUOTE}-PERP`.
pub fn perp_market(base: &str, quote: &str) -> String {
    format!("{}-{}-PERP", base, quote)
}
