//! Paradex REST API client.
//!
//! Paradex has no bulk funding listing, so rates are fetched one market at a
//! time from the funding history endpoint and the latest entry is kept.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::types::latest_funding_rate;
use crate::config::MARKET_PLACEHOLDER;
use crate::exchange::errors::ProbeError;
use crate::exchange::traits::MarketFundingSource;
use crate::types::Platform;

/// Paradex funding history client.
#[derive(Debug, Clone)]
pub struct ParadexClient {
    client: Client,
    url_template: String,
    verbose: bool,
}

impl ParadexClient {
    /// Create a client sharing `client`, with `url_template` containing
    /// `{market}`.
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
            verbose: false,
        }
    }

    /// Log every request and its status at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Funding history URL for `market`.
    pub fn market_url(&self, market: &str) -> String {
        self.url_template
            .replace(MARKET_PLACEHOLDER, &urlencoding::encode(market))
    }

    /// Fetch the raw funding history payload for one market.
    #[instrument(skip(self), name = "paradex_funding_data")]
    pub async fn get_funding_data(&self, market: &str) -> Result<Value, ProbeError> {
        let url = self.market_url(market);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProbeError::transport(market, e))?;

        let status = response.status();
        if self.verbose {
            info!(%url, status = status.as_u16(), "Paradex GET");
        } else {
            debug!(%url, status = status.as_u16(), "Paradex GET");
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ProbeError::NotFound(market.to_string()));
        }
        if !status.is_success() {
            return Err(ProbeError::Status {
                market: market.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| ProbeError::Body {
            market: market.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MarketFundingSource for ParadexClient {
    fn venue(&self) -> Platform {
        Platform::Paradex
    }

    async fn latest_funding(&self, market: &str) -> Result<Decimal, ProbeError> {
        let payload = self.get_funding_data(market).await?;
        let rate = latest_funding_rate(&payload)
            .ok_or_else(|| ProbeError::NoEntries(market.to_string()))?;

        debug!(market, %rate, "Paradex latest funding_rate");
        Ok(rate)
    }
}
