//! Directory source: every `*.csv`, `*.log` and `*.tsv` file directly inside
//! a directory, in file-name order.
//!
//! A missing directory is fatal and surfaces immediately. A single unreadable
//! file is not: it is logged, recorded in [`LoadOutcome::skipped`] and the
//! remaining tables still load.

use crate::{normalize_sources, normalize_sources_parallel, FileSource, LoadOutcome, TableSource};
use netnorm_core::{Error, Kind, Result};
use std::path::Path;
use std::sync::Arc;

const TABLE_EXTENSIONS: &[&str] = &["csv", "log", "tsv"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirOptions {
    /// Only load tables of this kind (e.g. `conn` for a connections-only series).
    pub kind: Option<Kind>,
}

/// List the table files of `dir`, sorted by file name.
pub fn discover(dir: &Path, options: &DirOptions) -> Result<Vec<FileSource>> {
    if !dir.exists() {
        return Err(Error::SourceDirMissing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_table = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| TABLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if !is_table {
            continue;
        }
        if let Some(kind) = &options.kind {
            if Kind::from_path(&path) != *kind {
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();

    tracing::debug!(dir = %dir.display(), tables = paths.len(), "discovered tables");
    Ok(paths.into_iter().map(FileSource::new).collect())
}

pub fn load_dir(dir: &Path, options: &DirOptions) -> Result<LoadOutcome> {
    Ok(normalize_sources(&discover(dir, options)?))
}

pub async fn load_dir_parallel(dir: &Path, options: &DirOptions) -> Result<LoadOutcome> {
    let sources = discover(dir, options)?
        .into_iter()
        .map(|s| Arc::new(s) as Arc<dyn TableSource>)
        .collect();
    Ok(normalize_sources_parallel(sources).await)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
