//! Aggregator parsing diagnostics.
//!
//! Collected while folding a payload so an empty result can be explained
//! (which venues were seen, what the rejected record-like nodes looked like).

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::extract::{is_rate_key, is_symbol_key};
use crate::types::Platform;

/// Fields shown per sampled node.
const PREVIEW_FIELDS: usize = 8;
/// Characters kept from a sampled node's preview.
const PREVIEW_CHARS: usize = 300;

/// A rejected node that looked like it could have been a funding record.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSample {
    /// Slash-joined path from the payload root
    pub path: String,
    /// Compact JSON of the node's first few fields
    pub preview: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanDiagnostics {
    platform_counts: BTreeMap<Platform, usize>,
    samples: Vec<NodeSample>,
    sample_limit: usize,
}

impl ScanDiagnostics {
    /// Sampling is disabled when `limit` is zero.
    pub fn with_sample_limit(limit: usize) -> Self {
        Self {
            sample_limit: limit,
            ..Self::default()
        }
    }

    /// Count a classified node. Nodes carrying a symbol or rate without a
    /// resolvable venue are counted as [`Platform::Unknown`].
    pub fn count_platform(&mut self, platform: Option<Platform>, has_payload: bool) {
        let key = match (platform, has_payload) {
            (Some(platform), _) => platform,
            (None, true) => Platform::Unknown,
            (None, false) => return,
        };
        *self.platform_counts.entry(key).or_default() += 1;
    }

    pub fn sample_rejected(&mut self, node: &Map<String, Value>, path: &[String]) {
        if self.samples.len() >= self.sample_limit {
            return;
        }
        let looks_like_record = node.keys().any(|k| is_symbol_key(k) || is_rate_key(k));
        if !looks_like_record {
            return;
        }

        let slim: Map<String, Value> = node
            .iter()
            .take(PREVIEW_FIELDS)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let preview: String = Value::Object(slim)
            .to_string()
            .chars()
            .take(PREVIEW_CHARS)
            .collect();

        self.samples.push(NodeSample {
            path: path.join("/"),
            preview,
        });
    }

    pub fn platform_count(&self, platform: Platform) -> usize {
        self.platform_counts.get(&platform).copied().unwrap_or(0)
    }

    pub fn samples(&self) -> &[NodeSample] {
        &self.samples
    }

    /// Explain an empty aggregator result in the logs.
    pub fn log_empty_result(&self) {
        warn!(
            platforms = ?self.platform_counts,
            "Aggregator produced no Hyperliquid/Lighter records"
        );
        for sample in &self.samples {
            warn!(path = %sample.path, "Candidate node: {} ...", sample.preview);
        }
    }
}
