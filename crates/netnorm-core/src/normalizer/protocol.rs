//! `unified_protocol` resolution.
//!
//! [`PROTOCOL_CHAIN`] is evaluated in order and the first resolver returning
//! `Some` wins. If none match, the label is inferred from the kind
//! (`unknown_<kind>`), so the result is never empty.

use crate::types::{Kind, RawRecord, ABSENT_MARKERS};

pub const PASSTHROUGH_FIELD: &str = "unified_protocol";
pub const SERVICE_FIELD: &str = "service";
pub const TRANSPORT_FIELD: &str = "proto";

/// A single step of the chain. `Some` must hold at least one non-empty label.
pub type ProtocolResolver = fn(&Kind, &RawRecord) -> Option<Vec<String>>;

pub const PROTOCOL_CHAIN: &[(&str, ProtocolResolver)] = &[
    (PASSTHROUGH_FIELD, passthrough_protocol),
    (SERVICE_FIELD, service_protocols),
    (TRANSPORT_FIELD, transport_protocol),
];

/// One label per output row. More than one label means the record expands.
pub fn resolve_protocols(kind: &Kind, record: &RawRecord) -> Vec<String> {
    PROTOCOL_CHAIN
        .iter()
        .find_map(|(_, resolve)| resolve(kind, record))
        .unwrap_or_else(|| vec![kind.inferred_protocol()])
}

/// Rows that are already unified keep their label.
pub fn passthrough_protocol(_kind: &Kind, record: &RawRecord) -> Option<Vec<String>> {
    record
        .get(PASSTHROUGH_FIELD)
        .map(|label| vec![label.to_lowercase()])
}

/// Connection logs list application protocols as `http,ssl`. Empty tokens and
/// absent-value markers are discarded; a value with no token left counts as
/// absent.
pub fn service_protocols(kind: &Kind, record: &RawRecord) -> Option<Vec<String>> {
    if !kind.is_connection() {
        return None;
    }
    let tokens: Vec<String> = record
        .get(SERVICE_FIELD)?
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !ABSENT_MARKERS.contains(&t.as_str()))
        .collect();
    (!tokens.is_empty()).then_some(tokens)
}

pub fn transport_protocol(_kind: &Kind, record: &RawRecord) -> Option<Vec<String>> {
    record
        .get(TRANSPORT_FIELD)
        .map(|proto| vec![proto.to_lowercase()])
}
