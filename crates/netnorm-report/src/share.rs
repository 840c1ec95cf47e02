//! Protocol-share aggregator: events per `unified_protocol`, minus excluded
//! labels, with the long tail folded into [`OTHER_LABEL`].

use netnorm_core::config::ReportConfig;
use netnorm_core::UnifiedTable;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const OTHER_LABEL: &str = "other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    /// Lowercase labels to leave out entirely.
    pub excluded: BTreeSet<String>,
    pub top_n: usize,
}

impl ShareOptions {
    pub fn new(excluded: impl IntoIterator<Item = impl AsRef<str>>, top_n: usize) -> Self {
        Self {
            excluded: excluded
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .collect(),
            top_n,
        }
    }
}

impl From<&ReportConfig> for ShareOptions {
    fn from(cfg: &ReportConfig) -> Self {
        Self::new(&cfg.excluded_protocols, cfg.top_n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareSlice {
    pub label: String,
    pub events: u64,
    /// Share of all non-excluded events, 0–100.
    pub percent: f64,
}

/// Slices sorted by events descending, ties by label. At most `top_n` named
/// slices plus `other` when more labels exist.
pub fn protocol_share(table: &UnifiedTable, options: &ShareOptions) -> Vec<ShareSlice> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in table {
        if !options.excluded.contains(&record.unified_protocol) {
            *totals.entry(record.unified_protocol.as_str()).or_default() += record.event_count;
        }
    }

    let mut ranked: Vec<(String, u64)> = totals
        .into_iter()
        .map(|(label, events)| (label.to_string(), events))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if ranked.len() > options.top_n {
        let rest: u64 = ranked.drain(options.top_n..).map(|(_, events)| events).sum();
        ranked.push((OTHER_LABEL.to_string(), rest));
    }

    let total: u64 = ranked.iter().map(|(_, events)| events).sum();
    ranked
        .into_iter()
        .map(|(label, events)| ShareSlice {
            label,
            events,
            percent: if total == 0 {
                0.0
            } else {
                events as f64 * 100.0 / total as f64
            },
        })
        .collect()
}
