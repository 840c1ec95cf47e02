//! In-memory source: a kind tag plus table text. Handy for tests and for
//! callers that already hold the log contents.

use crate::TableSource;
use netnorm_core::{Kind, LoadedTable, Loader};

#[derive(Debug, Clone)]
pub struct MemorySource {
    kind: Kind,
    text: String,
}

impl MemorySource {
    pub fn new(kind: impl AsRef<str>, text: impl Into<String>) -> Self {
        Self {
            kind: Kind::new(kind),
            text: text.into(),
        }
    }
}

impl TableSource for MemorySource {
    fn kind(&self) -> Kind {
        self.kind.clone()
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.kind)
    }

    fn load(&self) -> netnorm_core::Result<LoadedTable> {
        Ok(Loader::load_str(self.kind.clone(), &self.text))
    }
}
