//! Error type shared by every netnorm crate.
//!
//! Only structural failures live here. Per-record problems (missing fields,
//! garbled timestamps, non-numeric byte cells) are never errors; they are
//! `None` in the resolvers and counted in [`NormalizeReport`](crate::NormalizeReport).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source directory {} does not exist", .0.display())]
    SourceDirMissing(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bucket width {0:?} (expected e.g. \"30S\", \"5min\", \"1H\")")]
    InvalidBucketWidth(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
