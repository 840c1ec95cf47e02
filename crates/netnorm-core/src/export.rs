//! Export: persists a [`UnifiedTable`] as CSV with the stable column order
//! `datetime,unified_protocol,total_bytes,event_count`.
//!
//! The output reads back through [`Loader`](crate::Loader) as an
//! already-unified table and normalizes to the same rows.

use crate::error::{Error, Result};
use crate::types::{format_datetime, UnifiedRecord, UnifiedTable, UNIFIED_COLUMNS};
use std::io::Write;
use std::path::Path;

/// Quote a field if it contains a comma, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_row(record: &UnifiedRecord) -> String {
    format!(
        "{},{},{},{}",
        format_datetime(&record.datetime),
        escape_field(&record.unified_protocol),
        record.total_bytes,
        record.event_count
    )
}

impl UnifiedTable {
    /// Header line followed by one line per row, each newline-terminated.
    pub fn to_csv_string(&self) -> String {
        let mut out = UNIFIED_COLUMNS.join(",");
        out.push('\n');
        for record in self {
            out.push_str(&format_row(record));
            out.push('\n');
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let export_err = |source| Error::Export {
            path: path.to_path_buf(),
            source,
        };
        let mut file = std::io::BufWriter::new(std::fs::File::create(path).map_err(export_err)?);
        file.write_all(self.to_csv_string().as_bytes())
            .and_then(|_| file.flush())
            .map_err(export_err)?;
        tracing::debug!(path = %path.display(), rows = self.len(), "wrote unified table");
        Ok(())
    }
}
