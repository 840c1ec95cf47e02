//! Plain-text and JSON rendering of the aggregates.
//!
//! Drawing charts is left to whatever consumes the JSON report; the text form
//! is for a quick look in the terminal.

use crate::bucket::Bucket;
use crate::share::ShareSlice;
use netnorm_core::types::format_datetime;
use netnorm_core::NormalizeReport;
use serde::Serialize;
use std::fmt::Write as _;

/// Everything a chart front-end needs, serialised as one JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tables_loaded: usize,
    pub tables_skipped: usize,
    pub normalize: NormalizeReport,
    pub bucket_width: String,
    pub events_over_time: Vec<Bucket>,
    pub protocol_share: Vec<ShareSlice>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Widest bar, in characters.
const BAR_WIDTH: u64 = 40;

fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (u128::from(value) * u128::from(BAR_WIDTH)).div_ceil(u128::from(max));
    "#".repeat(len as usize)
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let n = &report.normalize;
    let _ = writeln!(
        out,
        "tables: {} loaded, {} skipped | records: {} in, {} out, {} dropped (timestamp), {} expanded",
        report.tables_loaded,
        report.tables_skipped,
        n.records_in,
        n.records_out,
        n.dropped_timestamps,
        n.expanded_records,
    );

    let _ = writeln!(out, "\nEvents over time (bucket={})", report.bucket_width);
    if report.events_over_time.is_empty() {
        let _ = writeln!(out, "  no valid timestamps");
    }
    let max = report.events_over_time.iter().map(|b| b.events).max().unwrap_or(0);
    for bucket in &report.events_over_time {
        let _ = writeln!(
            out,
            "  {:<24} {:>8} {}",
            format_datetime(&bucket.start),
            bucket.events,
            bar(bucket.events, max)
        );
    }

    let _ = writeln!(out, "\nProtocol share by event count");
    if report.protocol_share.is_empty() {
        let _ = writeln!(out, "  no protocols left after exclusions");
    }
    let label_width = report
        .protocol_share
        .iter()
        .map(|s| s.label.len())
        .max()
        .unwrap_or(0);
    for slice in &report.protocol_share {
        let _ = writeln!(
            out,
            "  {:<width$} {:>8} {:>6.1}%",
            slice.label,
            slice.events,
            slice.percent,
            width = label_width
        );
    }
    out
}
