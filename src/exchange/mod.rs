//! Exchange integrations for funding rate retrieval.
//!
//! ## Aggregator
//! One bulk endpoint returning nested, schema-less JSON that covers
//! Hyperliquid and Lighter.
//!
//! ## Paradex
//! Per-market funding history, probed through [`MarketFundingSource`].

mod client;
mod errors;
pub mod paradex;
mod traits;

pub use client::{build_http_client, AggregatorClient};
pub use errors::ProbeError;
pub use paradex::ParadexClient;
pub use traits::{perp_market, MarketFundingSource};

#[cfg(test)]
pub use traits::MockMarketFundingSource;
