//! `total_bytes` resolution: directional sum, then a single byte-like field,
//! then `0`.

use crate::types::RawRecord;

/// Origin- and response-direction payload sizes of connection logs.
pub const DIRECTIONAL_FIELDS: [&str; 2] = ["orig_bytes", "resp_bytes"];

/// Single byte-like fields, in order: HTTP body length, file size (also the
/// column name of already-unified tables).
pub const SINGLE_FIELDS: &[&str] = &["response_body_len", "total_bytes"];

pub type ByteResolver = fn(&RawRecord) -> Option<u64>;

pub const BYTE_CHAIN: &[(&str, ByteResolver)] = &[
    ("directional", directional_bytes),
    ("single_field", single_field_bytes),
];

pub fn resolve_total_bytes(record: &RawRecord) -> u64 {
    BYTE_CHAIN
        .iter()
        .find_map(|(_, resolve)| resolve(record))
        .unwrap_or(0)
}

/// Sum of both directions. A missing side counts as 0, but at least one side
/// has to be present and numeric.
pub fn directional_bytes(record: &RawRecord) -> Option<u64> {
    let [orig, resp] = DIRECTIONAL_FIELDS.map(|f| record.get_bytes(f));
    if orig.is_none() && resp.is_none() {
        return None;
    }
    Some(orig.unwrap_or(0).saturating_add(resp.unwrap_or(0)))
}

pub fn single_field_bytes(record: &RawRecord) -> Option<u64> {
    SINGLE_FIELDS.iter().find_map(|f| record.get_bytes(f))
}
