//! End-to-end funding scan across the three venues.
//!
//! Fetches the aggregator (Hyperliquid + Lighter), reconciles it, then probes
//! the discovery-only venue for every selected base.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::probe::MarketProbe;
use crate::exchange::{AggregatorClient, MarketFundingSource};
use crate::extract::base_from_symbol;
use crate::reconcile::{FundingTable, Reconciler, ScanDiagnostics};
use crate::types::{FundingRecord, Platform};

/// Rejected aggregator nodes kept when diagnostics are on.
const DIAGNOSTIC_SAMPLES: usize = 10;

/// Which bases to probe and how fast.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Probe exactly these bases instead of the seed venue's list
    pub only_bases: Vec<String>,
    /// Cap on probed bases (after selection)
    pub limit: Option<usize>,
    /// Pause between successive bases
    pub delay: Duration,
    /// Collect and log aggregator parsing diagnostics
    pub diagnostics: bool,
}

/// Output of one scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub table: FundingTable,
    /// Bases first listed by the seed venue
    pub seed: Vec<String>,
    /// Bases that were probed, in probe order
    pub probed: Vec<String>,
    pub diagnostics: ScanDiagnostics,
}

/// Orchestrates aggregator reconciliation and per-market probing.
pub struct FundingScanner<S> {
    aggregator: AggregatorClient,
    source: S,
    probe: MarketProbe,
    options: ScanOptions,
}

impl<S: MarketFundingSource> FundingScanner<S> {
    pub fn new(
        aggregator: AggregatorClient,
        source: S,
        probe: MarketProbe,
        options: ScanOptions,
    ) -> Self {
        Self {
            aggregator,
            source,
            probe,
            options,
        }
    }

    /// Run a full scan. Only the aggregator fetch can fail.
    #[instrument(skip(self), name = "funding_scan")]
    pub async fn run(&self) -> Result<ScanReport> {
        let payload = self
            .aggregator
            .fetch_snapshot()
            .await
            .with_context(|| format!("Error reading aggregator {}", self.aggregator.url()))?;

        let sample_limit = if self.options.diagnostics {
            DIAGNOSTIC_SAMPLES
        } else {
            0
        };
        let mut reconciler = Reconciler::default().with_sample_limit(sample_limit);
        let accepted = reconciler.absorb_payload(&payload);

        info!(
            accepted,
            assets = reconciler.table().len(),
            hyperliquid = reconciler.table().platform_coverage(Platform::Hyperliquid),
            lighter = reconciler.table().platform_coverage(Platform::Lighter),
            "Reconciled aggregator snapshot"
        );
        if reconciler.table().is_empty() && self.options.diagnostics {
            reconciler.diagnostics().log_empty_result();
        }

        // Allowlisted bases keep a row even when the limit skips their probe
        for base in allowlisted_bases(&self.options.only_bases) {
            reconciler.ensure_asset(&base);
        }

        let bases = select_bases(reconciler.seed(), &self.options);
        let venue = self.source.venue();
        info!(count = bases.len(), %venue, quotes = ?self.probe.quotes(), "Probing markets");

        for (idx, base) in bases.iter().enumerate() {
            if idx > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            match self.probe.latest_for_base(&self.source, base).await {
                Some(rate) => reconciler.accept(FundingRecord::new(venue, base, rate)),
                None => debug!(%base, %venue, "No rate"),
            }
        }

        let reconciled = reconciler.finish();
        info!(
            assets = reconciled.table.len(),
            probed = bases.len(),
            found = reconciled.table.platform_coverage(venue),
            "Funding scan complete"
        );

        Ok(ScanReport {
            table: reconciled.table,
            seed: reconciled.seed,
            probed: bases,
            diagnostics: reconciled.diagnostics,
        })
    }
}

/// Canonical, deduplicated allowlist in the order given.
fn allowlisted_bases(only_bases: &[String]) -> Vec<String> {
    let mut picked: Vec<String> = Vec::with_capacity(only_bases.len());
    for base in only_bases.iter().map(|b| base_from_symbol(b)) {
        if !picked.contains(&base) {
            picked.push(base);
        }
    }
    picked
}

/// Bases to probe: the allowlist if given, else the seed list; then capped by
/// `limit` when positive.
pub fn select_bases(seed: &[String], options: &ScanOptions) -> Vec<String> {
    let mut bases = if options.only_bases.is_empty() {
        seed.to_vec()
    } else {
        allowlisted_bases(&options.only_bases)
    };

    if let Some(limit) = options.limit.filter(|l| *l > 0) {
        bases.truncate(limit);
    }
    bases
}
