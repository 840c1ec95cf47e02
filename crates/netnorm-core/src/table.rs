//! Delimited-text tables: header row plus string cells.
//!
//! Two layouts are recognised by [`RawTable::parse`]:
//!
//! - **CSV** with a header row (quoted fields, doubled quotes, embedded commas
//!   and newlines inside quotes).
//! - **Native monitor logs**: tab-separated, with `#separator` / `#fields`
//!   directives. The header comes from `#fields`; every other `#` line is
//!   skipped.
//!
//! Short rows are padded with absent cells; surplus cells are dropped.

use crate::error::{Error, Result};
use crate::types::RawRecord;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read and parse a table from disk. Invalid UTF-8 is lossily converted.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let first = text.lines().map(str::trim).find(|l| !l.is_empty());
        match first {
            Some(line) if line.starts_with('#') => parse_monitor_log(text),
            Some(_) => parse_csv(text),
            None => Self::default(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pair each row with the header. Cells past the end of a short row are
    /// simply not inserted, which reads the same as an absent value.
    pub fn into_records(self) -> Vec<RawRecord> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| RawRecord::from_pairs(columns.iter().cloned().zip(row)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn parse_csv(text: &str) -> RawTable {
    let mut records = split_csv_records(text).into_iter();
    let columns = records
        .next()
        .map(|header| header.into_iter().map(|c| c.trim().to_string()).collect())
        .unwrap_or_default();
    RawTable {
        columns,
        rows: records.collect(),
    }
}

fn split_csv_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }
    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

// ---------------------------------------------------------------------------
// Native monitor log (TSV with directives)
// ---------------------------------------------------------------------------

fn parse_monitor_log(text: &str) -> RawTable {
    let mut separator = "\t".to_string();
    let mut table = RawTable::default();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(directive) = line.strip_prefix('#') {
            if let Some(value) = directive.strip_prefix("separator") {
                separator = unescape_hex(value.trim());
            } else if let Some(value) = directive.strip_prefix("fields") {
                table.columns = value
                    .split(separator.as_str())
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        table
            .rows
            .push(line.split(separator.as_str()).map(str::to_string).collect());
    }
    table
}

/// Decode `\xHH` escapes as used by the `#separator` directive.
fn unescape_hex(value: &str) -> String {
    let mut out = String::new();
    let mut rest = value;
    while !rest.is_empty() {
        if let Some(hex) = rest.strip_prefix("\\x").and_then(|r| r.get(..2)) {
            if let Ok(byte) = u8::from_str_radix(hex, 16) {
                out.push(byte as char);
                rest = &rest[4..];
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    if out.is_empty() {
        "\t".to_string()
    } else {
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
