//! Time-bucketed event counter.
//!
//! Buckets are fixed-width and aligned to the Unix epoch. The series runs from
//! the first populated bucket to the last, with zero-filled gaps in between.

use chrono::{DateTime, Utc};
use netnorm_core::{Error, Result, UnifiedTable};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Beyond this many buckets the gaps are left unfilled.
const MAX_FILLED_BUCKETS: i64 = 1_000_000;

fn width_re() -> &'static Regex {
    static WIDTH_RE: OnceLock<Regex> = OnceLock::new();
    WIDTH_RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)?\s*([A-Za-z]+)\s*$").expect("valid bucket width regex")
    })
}

/// Bucket width parsed from an offset string such as `30S`, `5min` or `1H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketWidth {
    millis: i64,
}

impl BucketWidth {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || Error::InvalidBucketWidth(spec.to_string());
        let caps = width_re().captures(spec).ok_or_else(invalid)?;
        let multiplier: i64 = match caps.get(1) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 1,
        };
        let unit_millis: i64 = match &caps[2] {
            "L" | "ms" => 1,
            "S" | "s" | "sec" => 1_000,
            "T" | "min" => 60_000,
            "H" | "h" => 3_600_000,
            "D" | "d" => 86_400_000,
            _ => return Err(invalid()),
        };
        let millis = multiplier.checked_mul(unit_millis).ok_or_else(invalid)?;
        if millis <= 0 {
            return Err(invalid());
        }
        Ok(Self { millis })
    }

    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Start of the bucket containing `at`.
    pub fn floor(&self, at: &DateTime<Utc>) -> i64 {
        at.timestamp_millis().div_euclid(self.millis) * self.millis
    }
}

impl std::str::FromStr for BucketWidth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub start: DateTime<Utc>,
    pub events: u64,
}

/// Sum `event_count` per bucket.
pub fn count_by_bucket(table: &UnifiedTable, width: BucketWidth) -> Vec<Bucket> {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for record in table {
        *counts.entry(width.floor(&record.datetime)).or_default() += record.event_count;
    }

    if let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) {
        let span = (last - first) / width.millis + 1;
        if span <= MAX_FILLED_BUCKETS {
            let mut start = first;
            while start < last {
                counts.entry(start).or_default();
                start += width.millis;
            }
        } else {
            tracing::warn!(buckets = span, "bucket series too long; leaving gaps unfilled");
        }
    }

    counts
        .into_iter()
        .filter_map(|(start, events)| {
            DateTime::from_timestamp_millis(start).map(|start| Bucket { start, events })
        })
        .collect()
}
