//! Test builders: ergonomic constructors for `RawRecord` and `UnifiedRecord`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, Utc};
use netnorm::{RawRecord, UnifiedRecord, UnifiedTable};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let rec = RecordBuilder::new()
///     .ts("1700000000")
///     .field("service", "http,ssl")
///     .bytes(100, 50)
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    record: RawRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ts(self, ts: impl Into<String>) -> Self {
        self.field("ts", ts)
    }

    pub fn bytes(self, orig: u64, resp: u64) -> Self {
        self.field("orig_bytes", orig.to_string())
            .field("resp_bytes", resp.to_string())
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.insert(name, value);
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

/// Shorthand for the most common fixture: a record with only a timestamp.
pub fn record_at(ts: &str) -> RecordBuilder {
    RecordBuilder::new().ts(ts)
}

// ---------------------------------------------------------------------------
// Unified rows
// ---------------------------------------------------------------------------

pub fn utc(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("timestamp in range")
}

pub fn unified(secs: i64, protocol: &str, bytes: u64) -> UnifiedRecord {
    UnifiedRecord::new(utc(secs), protocol, bytes)
}

/// `n` rows of `protocol`, one second apart from `start`.
pub fn unified_run(start: i64, protocol: &str, n: usize) -> UnifiedTable {
    UnifiedTable::from_records(
        (0..n as i64)
            .map(|i| unified(start + i, protocol, 0))
            .collect(),
    )
}
