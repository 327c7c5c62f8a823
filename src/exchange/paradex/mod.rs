//! Paradex exchange integration.
//!
//! Read-only access to Paradex perpetuals funding history. There is no
//! endpoint listing every market's current funding, so markets are probed
//! individually as `{BASE}-{QUOTE}-PERP`.
//!
//! # Funding Rate Notes
//!
//! Paradex reports `funding_rate` already as a fraction, so probed values
//! are taken as-is without the percentage heuristic used for the
//! aggregator.

mod client;
mod types;

pub use client::ParadexClient;
pub use types::*;
