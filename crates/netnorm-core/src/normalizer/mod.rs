//! Normalizer: maps kind-specific [`RawRecord`]s onto the unified schema.
//!
//! Each output field has its own ordered resolver chain, evaluated
//! independently per record:
//!
//! | Field | Chain | Module |
//! |-------|-------|--------|
//! | `datetime` | `ts` → `datetime`; failure drops the record | [`timestamp`] |
//! | `unified_protocol` | `unified_protocol` → `service` (conn only, expands) → `proto` → `unknown_<kind>` | [`protocol`] |
//! | `total_bytes` | `orig_bytes + resp_bytes` → `response_body_len` / `total_bytes` → `0` | [`bytes`] |
//! | `event_count` | always 1 | |
//!
//! Protocols are never filtered here; exclusion belongs to the consumers.

pub mod bytes;
pub mod protocol;
pub mod timestamp;

use crate::loader::LoadedTable;
use crate::types::{Kind, RawRecord, UnifiedRecord, UnifiedTable};
use serde::Serialize;

/// Per-table diagnostics. Reports from several tables merge by summation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Source records seen.
    pub records_in: usize,
    /// Unified rows produced (after expansion).
    pub records_out: usize,
    /// Source records dropped for a missing or unparseable timestamp.
    pub dropped_timestamps: usize,
    /// Source records that expanded into more than one row.
    pub expanded_records: usize,
}

impl NormalizeReport {
    pub fn merge(&mut self, other: &NormalizeReport) {
        self.records_in += other.records_in;
        self.records_out += other.records_out;
        self.dropped_timestamps += other.dropped_timestamps;
        self.expanded_records += other.expanded_records;
    }
}

/// A unified table together with how it was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub table: UnifiedTable,
    pub report: NormalizeReport,
}

impl Normalized {
    /// Append another result. Concatenation only; rows are never rewritten.
    pub fn merge(&mut self, other: Normalized) {
        self.table.append(other.table);
        self.report.merge(&other.report);
    }
}

/// Normalize one record. `None` means it was dropped for its timestamp.
pub fn normalize_record(kind: &Kind, record: &RawRecord) -> Option<Vec<UnifiedRecord>> {
    let datetime = timestamp::resolve_datetime(record)?;
    let total_bytes = bytes::resolve_total_bytes(record);
    Some(
        protocol::resolve_protocols(kind, record)
            .into_iter()
            .map(|label| UnifiedRecord::new(datetime, label, total_bytes))
            .collect(),
    )
}

pub fn normalize_table(table: &LoadedTable) -> Normalized {
    let mut rows = Vec::with_capacity(table.len());
    let mut report = NormalizeReport {
        records_in: table.len(),
        ..NormalizeReport::default()
    };

    if !table.is_empty() && !table.profile().can_produce_rows() {
        tracing::info!(
            kind = %table.kind,
            source = ?table.source,
            rows = table.len(),
            "table has no timestamp column; all records dropped"
        );
    }

    for (index, record) in table.records.iter().enumerate() {
        match normalize_record(&table.kind, record) {
            Some(expanded) => {
                if expanded.len() > 1 {
                    report.expanded_records += 1;
                }
                rows.extend(expanded);
            }
            None => {
                report.dropped_timestamps += 1;
                tracing::trace!(kind = %table.kind, index, "dropped record without a usable timestamp");
            }
        }
    }
    report.records_out = rows.len();

    tracing::debug!(
        kind = %table.kind,
        records_in = report.records_in,
        records_out = report.records_out,
        dropped = report.dropped_timestamps,
        expanded = report.expanded_records,
        "normalized table"
    );
    if report.dropped_timestamps > 0 {
        tracing::info!(
            kind = %table.kind,
            dropped = report.dropped_timestamps,
            "dropped records with missing or unparseable timestamps"
        );
    }

    Normalized {
        table: UnifiedTable::from_records(rows),
        report,
    }
}

/// Normalize every table and concatenate the results in iteration order.
pub fn normalize_all<'a>(tables: impl IntoIterator<Item = &'a LoadedTable>) -> Normalized {
    let mut out = Normalized::default();
    for table in tables {
        out.merge(normalize_table(table));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
