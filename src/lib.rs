//! netnorm: network log normalization.
//!
//! Reads a directory of network-monitor log tables (connection, DNS, HTTP,
//! file logs, …), normalizes every row into the four-column unified schema
//! and aggregates it. This crate re-exports the workspace crates so that
//! integration tests and benches can import them from one place.
//!
//! # Architecture
//!
//! ```text
//! Sources ──► Loader ──► Normalizer ──► UnifiedTable ──► Report
//!                                             │
//!                                             └──► Export (CSV)
//! ```

pub use netnorm_core;
pub use netnorm_report;
pub use netnorm_sources;

pub use netnorm_core::{
    normalize_all, normalize_record, normalize_table, Error, Kind, LoadedTable, Loader,
    NormalizeReport, Normalized, RawRecord, RawTable, UnifiedRecord, UnifiedTable,
    UNIFIED_COLUMNS,
};
