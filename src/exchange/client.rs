//! Shared HTTP client and the bulk funding aggregator.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::HttpConfig;

/// Build the single HTTP client reused for every request of a run.
pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()
        .context("Failed to create HTTP client")
}

/// Client for the multi-venue funding aggregator.
///
/// The payload has no guaranteed schema and is returned as an opaque JSON
/// tree for the extraction engine.
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    client: Client,
    url: String,
}

impl AggregatorClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the aggregator snapshot. Any failure here is fatal for a run.
    #[instrument(skip(self), name = "aggregator_fetch")]
    pub async fn fetch_snapshot(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to send aggregator request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Aggregator API error {}: {}", status, body);
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to parse aggregator response")?;

        debug!(url = %self.url, "Fetched aggregator snapshot");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_client_builds() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/funding-rates"))
            .and(header("user-agent", "funding-triplet-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "funding_rates": [{"exchange": "lighter", "symbol": "BTC", "rate": 0.0001}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = build_http_client(&HttpConfig {
            timeout_secs: 5,
            user_agent: "funding-triplet-test".to_string(),
        })
        .unwrap();
        let client = AggregatorClient::new(http, format!("{}/api/v1/funding-rates", server.uri()));

        let payload = client.fetch_snapshot().await.unwrap();
        assert_eq!(payload["funding_rates"][0]["symbol"], "BTC");
    }

    #[tokio::test]
    async fn test_fetch_snapshot_errors_are_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let down = AggregatorClient::new(Client::new(), format!("{}/down", server.uri()));
        let err = down.fetch_snapshot().await.unwrap_err();
        assert!(err.to_string().contains("502"));

        let html = AggregatorClient::new(Client::new(), format!("{}/html", server.uri()));
        assert!(html.fetch_snapshot().await.is_err());
    }
}
