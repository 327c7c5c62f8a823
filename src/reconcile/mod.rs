//! Cross-venue reconciliation of funding records.
//!
//! Folds records from any source into a single base → platform → rate
//! table and remembers which bases the seed venue listed first.

mod diagnostics;
mod table;

pub use diagnostics::{NodeSample, ScanDiagnostics};
pub use table::FundingTable;

use serde_json::Value;
use std::collections::HashSet;
use tracing::trace;

use crate::extract::{extract_candidate, object_nodes};
use crate::types::{FundingRecord, Platform};

/// Venue whose assets drive per-market probing.
pub const SEED_PLATFORM: Platform = Platform::Lighter;

/// Accumulates funding records into a [`FundingTable`] plus the seed list.
#[derive(Debug)]
pub struct Reconciler {
    table: FundingTable,
    seed_platform: Platform,
    seed: Vec<String>,
    seen_seed: HashSet<String>,
    diagnostics: ScanDiagnostics,
}

/// Result of reconciling one or more sources.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub table: FundingTable,
    /// Bases first seen on the seed venue, in first-seen order
    pub seed: Vec<String>,
    pub diagnostics: ScanDiagnostics,
}

impl Reconciler {
    /// Create a reconciler seeded from `seed_platform`.
    pub fn new(seed_platform: Platform) -> Self {
        Self {
            table: FundingTable::default(),
            seed_platform,
            seed: Vec::new(),
            seen_seed: HashSet::new(),
            diagnostics: ScanDiagnostics::default(),
        }
    }

    /// Keep up to `limit` rejected record-like nodes for troubleshooting.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.diagnostics = ScanDiagnostics::with_sample_limit(limit);
        self
    }

    /// Venues accepted from the aggregator: Hyperliquid and the seed venue.
    pub fn accepts_aggregated(&self, platform: Platform) -> bool {
        platform == Platform::Hyperliquid || platform == self.seed_platform
    }

    /// Upsert a record. The last write for a (base, platform) pair wins.
    pub fn accept(&mut self, record: FundingRecord) {
        let FundingRecord {
            platform,
            base,
            rate,
        } = record;

        if platform == self.seed_platform && self.seen_seed.insert(base.clone()) {
            self.seed.push(base.clone());
        }
        if let Some(previous) = self.table.insert(&base, platform, rate) {
            trace!(%base, %platform, %previous, %rate, "Overwrote funding rate");
        }
    }

    /// Make sure `base` has a row, even without any rate.
    pub fn ensure_asset(&mut self, base: &str) {
        self.table.ensure_asset(base);
    }

    /// Walk an aggregator payload and fold every accepted record.
    ///
    /// Returns the number of records accepted.
    pub fn absorb_payload(&mut self, payload: &Value) -> usize {
        let mut accepted = 0;

        for (node, path) in object_nodes(payload) {
            let candidate = extract_candidate(node, &path);
            self.diagnostics.count_platform(candidate.platform, candidate.has_payload());

            match candidate.into_record(|p| self.accepts_aggregated(p)) {
                Some(record) => {
                    self.accept(record);
                    accepted += 1;
                }
                None => self.diagnostics.sample_rejected(node, &path),
            }
        }

        accepted
    }

    pub fn table(&self) -> &FundingTable {
        &self.table
    }

    pub fn seed(&self) -> &[String] {
        &self.seed
    }

    pub fn diagnostics(&self) -> &ScanDiagnostics {
        &self.diagnostics
    }

    pub fn finish(self) -> Reconciled {
        Reconciled {
            table: self.table,
            seed: self.seed,
            diagnostics: self.diagnostics,
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(SEED_PLATFORM)
    }
}
