//! Core types for netnorm-core.
//!
//! This module defines the data structures shared across every layer: the
//! source-side [`RawRecord`] and its [`Kind`] tag, and the output-side
//! [`UnifiedRecord`] / [`UnifiedTable`] pair that forms the four-column
//! unified schema.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Column order of the unified schema, as written by [`UnifiedTable::to_csv_string`].
pub const UNIFIED_COLUMNS: [&str; 4] = ["datetime", "unified_protocol", "total_bytes", "event_count"];

/// Cell values that mean "no value" in monitor logs and their CSV exports.
pub const ABSENT_MARKERS: &[&str] = &["", "-", "(empty)"];

/// Every unified row counts as exactly one event.
pub const EVENT_COUNT: u64 = 1;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Log category tag derived from a table's origin (`conn`, `dns`, `http`, …).
///
/// Always lowercase and never empty. Used only to select inference rules; it
/// is never written to the unified table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kind(String);

impl Kind {
    /// Connection logs, the only kind whose `service` column is expanded.
    pub const CONNECTION: &'static str = "conn";
    /// Stand-in for origins with no usable stem.
    pub const PLACEHOLDER: &'static str = "log_type";

    pub fn new(tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() {
            Kind(Self::PLACEHOLDER.to_string())
        } else {
            Kind(tag)
        }
    }

    /// Derive the kind from a file name: everything before the first `.`.
    ///
    /// `conn.log.csv` → `conn`, `dns.log` → `dns`,
    /// `conn.09:00:00-10:00:00.log` → `conn`.
    pub fn from_path(path: &Path) -> Self {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        Self::new(name.split('.').next().unwrap_or(""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_connection(&self) -> bool {
        self.0 == Self::CONNECTION
    }

    /// Label used when a record carries no protocol signal of its own.
    pub fn inferred_protocol(&self) -> String {
        format!("unknown_{}", self.0)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RawRecord
// ---------------------------------------------------------------------------

/// One source row: field name → cell text, shape determined by the log kind.
///
/// Missing columns and absent-value markers are indistinguishable through
/// [`RawRecord::get`]; both read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Trimmed value of `name`, or `None` if the column is missing or the cell
    /// holds one of the [`ABSENT_MARKERS`].
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = self.fields.get(name)?.trim();
        if ABSENT_MARKERS.contains(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// Numeric byte count in `name`. Malformed numbers read as absent.
    pub fn get_bytes(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(parse_byte_count)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse a byte-count cell.
///
/// Accepts unsigned integers and finite non-negative decimals (truncated toward
/// zero). Anything else is `None`.
pub fn parse_byte_count(value: &str) -> Option<u64> {
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }
    let n = value.parse::<f64>().ok()?;
    (n.is_finite() && n >= 0.0).then(|| n.trunc() as u64)
}

// ---------------------------------------------------------------------------
// UnifiedRecord / UnifiedTable
// ---------------------------------------------------------------------------

/// One row of the unified schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedRecord {
    pub datetime: DateTime<Utc>,
    /// Lowercase and never empty.
    pub unified_protocol: String,
    pub total_bytes: u64,
    /// Always [`EVENT_COUNT`].
    pub event_count: u64,
}

impl UnifiedRecord {
    pub fn new(datetime: DateTime<Utc>, unified_protocol: impl Into<String>, total_bytes: u64) -> Self {
        Self {
            datetime,
            unified_protocol: unified_protocol.into(),
            total_bytes,
            event_count: EVENT_COUNT,
        }
    }
}

/// RFC 3339 in UTC with a `Z` suffix; fractional seconds only when non-zero.
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// The concatenated output of one or more normalized source tables.
///
/// Rows are never edited in place; tables only grow by appending other tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedTable {
    records: Vec<UnifiedRecord>,
}

impl UnifiedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<UnifiedRecord>) -> Self {
        Self { records }
    }

    /// Concatenate tables in iteration order.
    pub fn concat(tables: impl IntoIterator<Item = UnifiedTable>) -> Self {
        let mut out = Self::new();
        for table in tables {
            out.append(table);
        }
        out
    }

    pub fn append(&mut self, other: UnifiedTable) {
        self.records.extend(other.records);
    }

    pub fn records(&self) -> &[UnifiedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnifiedRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<UnifiedRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a UnifiedTable {
    type Item = &'a UnifiedRecord;
    type IntoIter = std::slice::Iter<'a, UnifiedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kind_from_path_takes_first_stem() {
        assert_eq!(Kind::from_path(&PathBuf::from("/logs/conn.log.csv")).as_str(), "conn");
        assert_eq!(Kind::from_path(&PathBuf::from("DNS.log")).as_str(), "dns");
        assert_eq!(
            Kind::from_path(&PathBuf::from("conn.09:00:00-10:00:00.log")).as_str(),
            "conn"
        );
    }

    #[test]
    fn empty_stem_uses_placeholder() {
        let kind = Kind::from_path(&PathBuf::from(".csv"));
        assert_eq!(kind.as_str(), Kind::PLACEHOLDER);
        assert_eq!(kind.inferred_protocol(), "unknown_log_type");
    }

    #[test]
    fn absent_markers_read_as_none() {
        let rec = RawRecord::from_pairs([("a", "-"), ("b", "(empty)"), ("c", "  "), ("d", " x ")]);
        assert_eq!(rec.get("a"), None);
        assert_eq!(rec.get("b"), None);
        assert_eq!(rec.get("c"), None);
        assert_eq!(rec.get("d"), Some("x"));
        assert_eq!(rec.get("missing"), None);
    }

    #[test]
    fn byte_counts() {
        assert_eq!(parse_byte_count("100"), Some(100));
        assert_eq!(parse_byte_count("12.9"), Some(12));
        assert_eq!(parse_byte_count("-5"), None);
        assert_eq!(parse_byte_count("NaN"), None);
        assert_eq!(parse_byte_count("lots"), None);
    }

    #[test]
    fn datetime_format_omits_zero_fraction() {
        let dt = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_datetime(&dt), "2023-11-14T22:13:20Z");
        let dt = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();
        assert_eq!(format_datetime(&dt), "2023-11-14T22:13:20.500Z");
    }

    #[test]
    fn concat_preserves_order() {
        let dt = DateTime::from_timestamp(0, 0).unwrap();
        let a = UnifiedTable::from_records(vec![UnifiedRecord::new(dt, "dns", 0)]);
        let b = UnifiedTable::from_records(vec![UnifiedRecord::new(dt, "http", 1)]);
        let all = UnifiedTable::concat([a, b]);
        let labels: Vec<_> = all.iter().map(|r| r.unified_protocol.as_str()).collect();
        assert_eq!(labels, ["dns", "http"]);
        assert!(all.iter().all(|r| r.event_count == EVENT_COUNT));
    }
}
