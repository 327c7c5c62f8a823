//! # Funding Triplet
//!
//! Current hourly funding rates for perpetual futures on Hyperliquid,
//! Lighter and Paradex, reconciled into one per-asset table.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `extract`: Schema-free JSON walking and fuzzy field classification
//! - `reconcile`: Cross-venue merge into the base → platform → rate table
//! - `exchange`: Aggregator and Paradex HTTP clients
//! - `scanner`: Per-market probing and end-to-end scan orchestration
//! - `report`: Plain-text pivot rendering

pub mod config;
pub mod exchange;
pub mod extract;
pub mod reconcile;
pub mod report;
pub mod scanner;
pub mod types;

pub use config::Config;
pub use reconcile::FundingTable;
pub use types::{FundingRecord, Platform};
