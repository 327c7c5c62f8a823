//! Configuration management for funding-triplet.
//!
//! Loads settings from `.env`, an optional `config.*` file and `FUNDING__*`
//! environment variables. CLI flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder substituted with the market identifier in the probe URL.
pub const MARKET_PLACEHOLDER: &str = "{market}";

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream endpoints
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Per-market probing of the discovery-only venue
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Bulk funding endpoint covering Hyperliquid and Lighter
    #[serde(default = "default_aggregator_url")]
    pub aggregator_url: String,
    /// Paradex funding history URL, `{market}` is replaced per request
    #[serde(default = "default_paradex_funding_url")]
    pub paradex_funding_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Quote currencies tried in order when building `{BASE}-{QUOTE}-PERP`
    #[serde(default = "default_quotes")]
    pub quotes: Vec<String>,
    /// Pause between assets, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for hourly rolling log files (stderr only when unset)
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_aggregator_url() -> String {
    "https://mainnet.zklighter.elliot.ai/api/v1/funding-rates".to_string()
}

fn default_paradex_funding_url() -> String {
    "https://api.prod.paradex.trade/v1/funding/data?market={market}".to_string()
}

fn default_timeout_secs() -> u64 {
    12
}

fn default_user_agent() -> String {
    format!("funding-triplet/{}", env!("CARGO_PKG_VERSION"))
}

fn default_quotes() -> Vec<String> {
    vec!["USD".to_string(), "USDC".to_string()]
}

fn default_delay_ms() -> u64 {
    250
}

impl Config {
    /// Load configuration from environment variables and config files.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("FUNDING")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("probe.quotes")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            is_http_url(&self.endpoints.aggregator_url),
            "aggregator_url must be an http(s) URL"
        );
        anyhow::ensure!(
            is_http_url(&self.endpoints.paradex_funding_url),
            "paradex_funding_url must be an http(s) URL"
        );
        anyhow::ensure!(
            self.endpoints.paradex_funding_url.contains(MARKET_PLACEHOLDER),
            "paradex_funding_url must contain {}",
            MARKET_PLACEHOLDER
        );
        anyhow::ensure!(self.http.timeout_secs > 0, "timeout_secs must be > 0");
        anyhow::ensure!(
            self.probe.quotes.iter().any(|q| !q.trim().is_empty()),
            "at least one probe quote currency is required"
        );

        Ok(())
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ProbeConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Split a comma-separated list, trimming and upper-casing each entry.
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            aggregator_url: default_aggregator_url(),
            paradex_funding_url: default_paradex_funding_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            quotes: default_quotes(),
            delay_ms: default_delay_ms(),
        }
    }
}
