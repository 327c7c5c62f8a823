//! Per-market discovery for venues without a bulk funding listing.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::exchange::{perp_market, MarketFundingSource};

/// Tries quote currencies in priority order until one market answers.
#[derive(Debug, Clone)]
pub struct MarketProbe {
    quotes: Vec<String>,
    verbose: bool,
}

impl MarketProbe {
    /// `quotes` are tried in order, e.g. `["USD", "USDC"]`.
    pub fn new(quotes: Vec<String>) -> Self {
        Self {
            quotes,
            verbose: false,
        }
    }

    /// Log every probe at info level instead of debug.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    /// Latest funding rate for `base`, from the first quote that yields one.
    ///
    /// Quotes are never merged. Unlisted markets and failed requests only
    /// move on to the next quote.
    #[instrument(skip(self, source), fields(venue = %source.venue()))]
    pub async fn latest_for_base<S>(&self, source: &S, base: &str) -> Option<Decimal>
    where
        S: MarketFundingSource + ?Sized,
    {
        for quote in &self.quotes {
            let market = perp_market(base, quote);

            match source.latest_funding(&market).await {
                Ok(rate) => {
                    if self.verbose {
                        info!(%market, %rate, "Latest funding found");
                    } else {
                        debug!(%market, %rate, "Latest funding found");
                    }
                    return Some(rate);
                }
                Err(e) if e.is_not_found() => {
                    if self.verbose {
                        info!(%market, "Market not listed, trying next quote");
                    } else {
                        debug!(%market, "Market not listed, trying next quote");
                    }
                }
                Err(e) => {
                    if self.verbose {
                        info!(%market, error = %e, "Probe failed, trying next quote");
                    } else {
                        debug!(%market, error = %e, "Probe failed, trying next quote");
                    }
                }
            }
        }

        if self.verbose {
            info!(base, quotes = ?self.quotes, "No valid market");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::{MockMarketFundingSource, ParadexClient, ProbeError};
    use crate::types::Platform;
    use mockall::Sequence;
    use reqwest::Client;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quotes(list: &[&str]) -> Vec<String> {
        list.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn test_second_quote_used_when_first_unlisted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("market", "BTC-USD-PERP"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("market", "BTC-USDC-PERP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"funding_rate": "0.000031", "created_at": 1714525200000u64}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = ParadexClient::new(
            Client::new(),
            format!("{}/v1/funding/data?market={{market}}", server.uri()),
        );
        let probe = MarketProbe::new(quotes(&["USD", "USDC"]));

        assert_eq!(probe.latest_for_base(&source, "BTC").await, Some(dec!(0.000031)));
        // Mock expectations (one request each) are verified on drop
    }

    #[tokio::test]
    async fn test_quotes_tried_in_order_and_stop_at_first_hit() {
        let mut source = MockMarketFundingSource::new();
        let mut seq = Sequence::new();
        source.expect_venue().return_const(Platform::Paradex);
        source
            .expect_latest_funding()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|market: &str| {
                assert_eq!(market, "ETH-USD-PERP");
                Err(ProbeError::Status {
                    market: market.to_string(),
                    status: 503,
                })
            });
        source
            .expect_latest_funding()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|market: &str| {
                assert_eq!(market, "ETH-USDC-PERP");
                Ok(dec!(-0.0002))
            });

        let probe = MarketProbe::new(quotes(&["USD", "USDC", "USDT"])).verbose(true);
        assert_eq!(probe.latest_for_base(&source, "ETH").await, Some(dec!(-0.0002)));
    }

    #[tokio::test]
    async fn test_none_when_no_quote_yields_rate() {
        let mut source = MockMarketFundingSource::new();
        source.expect_venue().return_const(Platform::Paradex);
        source
            .expect_latest_funding()
            .times(2)
            .returning(|market: &str| Err(ProbeError::NoEntries(market.to_string())));

        let probe = MarketProbe::new(quotes(&["USD", "USDC"]));
        assert_eq!(probe.latest_for_base(&source, "XYZ").await, None);
    }
}
