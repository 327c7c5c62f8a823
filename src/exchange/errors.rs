//! Per-market probe error types

use thiserror::Error;

/// Why a single market probe produced no rate.
///
/// All variants are recoverable: the caller moves on to the next quote.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Market {0} not listed")]
    NotFound(String),

    #[error("Market {market} returned HTTP {status}")]
    Status { market: String, status: u16 },

    #[error("Request for {market} timed out")]
    Timeout { market: String },

    #[error("Request for {market} failed: {source}")]
    Transport {
        market: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not decode funding data for {market}: {reason}")]
    Body { market: String, reason: String },

    #[error("No funding entry with a rate for {0}")]
    NoEntries(String),
}

impl ProbeError {
    pub(crate) fn transport(market: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                market: market.to_string(),
            }
        } else {
            Self::Transport {
                market: market.to_string(),
                source: err,
            }
        }
    }

    /// The venue does not list this market (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
