//! `datetime` resolution.
//!
//! The only step allowed to drop a record: `None` here means the record never
//! reaches the unified table. Nothing is ever defaulted to "now" or the epoch.

use crate::types::RawRecord;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Fields consulted, in order. The first one present decides; a garbled `ts`
/// does not fall back to `datetime`.
pub const TIMESTAMP_FIELDS: &[&str] = &["ts", "datetime"];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Years that RFC 3339 can write with four digits. Anything outside would
/// export in a form that no longer parses back.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

pub fn resolve_datetime(record: &RawRecord) -> Option<DateTime<Utc>> {
    let value = TIMESTAMP_FIELDS.iter().find_map(|f| record.get(f))?;
    parse_timestamp(value)
}

/// Epoch seconds (UTC) or recognised datetime text, within years 1 to 9999.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    parse_epoch_seconds(value)
        .or_else(|| parse_datetime_text(value))
        .filter(|dt| YEAR_RANGE.contains(&dt.year()))
}

fn parse_epoch_seconds(value: &str) -> Option<DateTime<Utc>> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let decimal = !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit());
    if !decimal {
        return parse_epoch_float(value);
    }

    let secs: i64 = int_part.parse().ok()?;
    let frac = &frac_part[..frac_part.len().min(9)];
    let nanos: u32 = format!("{frac:0<9}").parse().ok()?;

    match (negative, nanos) {
        (false, _) => DateTime::from_timestamp(secs, nanos),
        (true, 0) => DateTime::from_timestamp(secs.checked_neg()?, 0),
        (true, _) => DateTime::from_timestamp(secs.checked_neg()?.checked_sub(1)?, 1_000_000_000 - nanos),
    }
}

/// Exponent notation and other forms only `f64` understands.
fn parse_epoch_float(value: &str) -> Option<DateTime<Utc>> {
    let v = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let mut secs = v.floor();
    let mut nanos = ((v - secs) * 1e9).round();
    if nanos >= 1e9 {
        secs += 1.0;
        nanos = 0.0;
    }
    if secs.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, nanos as u32)
}

fn parse_datetime_text(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}
