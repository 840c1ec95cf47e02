//! Loader: turns one raw table into kind-annotated [`RawRecord`]s.
//!
//! The loader never fails on content: missing columns, empty tables and
//! malformed cells all load fine and are dealt with by the normalizer's
//! fallback chains. The only error is failing to read the file itself.

use crate::error::Result;
use crate::normalizer::{bytes, protocol, timestamp};
use crate::table::RawTable;
use crate::types::{Kind, RawRecord};
use std::path::{Path, PathBuf};

/// A single source table after loading, ready for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub kind: Kind,
    /// File the table came from, if any.
    pub source: Option<PathBuf>,
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl LoadedTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Which inference rules can possibly fire for this table, judged from
    /// its kind and header alone.
    pub fn profile(&self) -> SchemaProfile {
        SchemaProfile {
            timestamp_column: timestamp::TIMESTAMP_FIELDS
                .iter()
                .copied()
                .find(|f| self.has_column(f)),
            passthrough_protocol: self.has_column(protocol::PASSTHROUGH_FIELD),
            service_expansion: self.kind.is_connection() && self.has_column(protocol::SERVICE_FIELD),
            transport_protocol: self.has_column(protocol::TRANSPORT_FIELD),
            directional_bytes: bytes::DIRECTIONAL_FIELDS.iter().any(|f| self.has_column(f)),
            single_byte_field: bytes::SINGLE_FIELDS.iter().copied().find(|f| self.has_column(f)),
        }
    }
}

/// Column-level view of the rules that apply to a table.
///
/// Individual records may still fall through a rule whose column exists
/// (e.g. a `-` cell), so this is an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaProfile {
    pub timestamp_column: Option<&'static str>,
    pub passthrough_protocol: bool,
    pub service_expansion: bool,
    pub transport_protocol: bool,
    pub directional_bytes: bool,
    pub single_byte_field: Option<&'static str>,
}

impl SchemaProfile {
    /// No timestamp column means every record would be dropped.
    pub fn can_produce_rows(&self) -> bool {
        self.timestamp_column.is_some()
    }
}

pub struct Loader;

impl Loader {
    /// Read a table from disk, deriving its kind from the file name.
    pub fn load_path(path: &Path) -> Result<LoadedTable> {
        let table = RawTable::from_path(path)?;
        Ok(Self::from_table(
            Kind::from_path(path),
            table,
            Some(path.to_path_buf()),
        ))
    }

    pub fn load_str(kind: Kind, text: &str) -> LoadedTable {
        Self::from_table(kind, RawTable::parse(text), None)
    }

    pub fn from_table(kind: Kind, table: RawTable, source: Option<PathBuf>) -> LoadedTable {
        let columns = table.columns.clone();
        let records = table.into_records();
        tracing::debug!(
            kind = %kind,
            columns = columns.len(),
            rows = records.len(),
            source = ?source,
            "loaded table"
        );
        LoadedTable {
            kind,
            source,
            columns,
            records,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
