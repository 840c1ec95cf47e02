//! File source: one delimited table on disk; the kind comes from the file name.

use crate::TableSource;
use netnorm_core::{Kind, LoadedTable, Loader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileSource {
    fn kind(&self) -> Kind {
        Kind::from_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> netnorm_core::Result<LoadedTable> {
        Loader::load_path(&self.path)
    }
}
