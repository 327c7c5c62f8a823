//! Funding scan orchestration.
//!
//! Contains the logic for:
//! - Reconciling the aggregator snapshot into the per-asset table
//! - Selecting which bases to probe (seed venue list, allowlist, cap)
//! - Probing discovery-only venues quote by quote

mod funding;
mod probe;

pub use funding::{select_bases, FundingScanner, ScanOptions, ScanReport};
pub use probe::MarketProbe;
