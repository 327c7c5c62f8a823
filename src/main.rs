//! Funding Triplet - Main Entry Point
//!
//! Prints current hourly funding for Hyperliquid, Lighter and Paradex, with
//! the asset list seeded from Lighter.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use funding_triplet::config::{parse_symbol_list, Config, LoggingConfig};
use funding_triplet::exchange::{build_http_client, AggregatorClient, ParadexClient};
use funding_triplet::report::render_pivot;
use funding_triplet::scanner::{FundingScanner, MarketProbe, ScanOptions};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Funding Triplet CLI
#[derive(Parser)]
#[command(name = "funding-triplet")]
#[command(
    version,
    about = "Current funding: Hyperliquid + Lighter + Paradex (bases taken from Lighter)"
)]
struct Cli {
    /// Only these bases, comma separated: 'BTC,ETH,SOL'
    #[arg(long, default_value = "")]
    only_bases: String,

    /// Cap the number of probed tokens (0 = no cap)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Quote currencies to try on Paradex, in order: 'USD,USDC,USDT'
    #[arg(long)]
    quotes: Option<String>,

    /// Pause between Paradex assets in milliseconds
    #[arg(long)]
    sleep_ms: Option<u64>,

    /// Detailed Paradex probe logs
    #[arg(long)]
    paradex_verbose: bool,

    /// Debug aggregator parsing when no Hyperliquid/Lighter rows show up
    #[arg(long)]
    agg_debug: bool,

    /// Override the aggregator endpoint
    #[arg(long)]
    aggregator_url: Option<String>,

    /// Override the Paradex funding URL template (must contain {market})
    #[arg(long)]
    paradex_url: Option<String>,
}

impl Cli {
    /// Apply CLI overrides on top of file/env configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(quotes) = &self.quotes {
            config.probe.quotes = parse_symbol_list(quotes);
        }
        if let Some(ms) = self.sleep_ms {
            config.probe.delay_ms = ms;
        }
        if let Some(url) = &self.aggregator_url {
            config.endpoints.aggregator_url = url.clone();
        }
        if let Some(url) = &self.paradex_url {
            config.endpoints.paradex_funding_url = url.clone();
        }
    }

    fn log_level(&self) -> &'static str {
        if self.agg_debug {
            "debug"
        } else if self.paradex_verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    // Keep the file writer alive for the whole run
    let _guard = init_logging(&config.logging, cli.log_level())?;
    log_config(&config);

    let http = build_http_client(&config.http)?;
    let aggregator = AggregatorClient::new(http.clone(), &config.endpoints.aggregator_url);
    let paradex = ParadexClient::new(http, &config.endpoints.paradex_funding_url)
        .verbose(cli.paradex_verbose);

    let quotes = parse_symbol_list(&config.probe.quotes.join(","));
    let probe = MarketProbe::new(quotes).verbose(cli.paradex_verbose);
    let options = ScanOptions {
        only_bases: parse_symbol_list(&cli.only_bases),
        limit: (cli.limit > 0).then_some(cli.limit),
        delay: config.probe.delay(),
        diagnostics: cli.agg_debug,
    };

    let scanner = FundingScanner::new(aggregator, paradex, probe, options);
    let report = scanner.run().await?;

    print!("{}", render_pivot(&report.table, Utc::now()));
    Ok(())
}

/// Initialize logging to stderr (stdout carries the table), plus an hourly
/// rolling file when a log directory is configured.
fn init_logging(config: &LoggingConfig, level: &str) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("funding_triplet={}", level).parse()?)
        .add_directive(tracing::Level::WARN.into());

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::hourly(dir, "funding-triplet.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Log configuration on startup.
fn log_config(config: &Config) {
    info!("📋 Configuration:");
    info!("   Aggregator: {}", config.endpoints.aggregator_url);
    info!("   Paradex: {}", config.endpoints.paradex_funding_url);
    info!("   Quotes: {}", config.probe.quotes.join(","));
    info!("   Delay: {}ms", config.probe.delay_ms);
    info!("   Timeout: {}s", config.http.timeout_secs);
}
