//! netnorm-sources: table source adapters for netnorm.
//!
//! Each source yields one [`LoadedTable`]. Sources are loaded and normalized
//! independently and merged afterwards, either sequentially
//! ([`normalize_sources`]) or one blocking task per table
//! ([`normalize_sources_parallel`]).

pub mod dir;
pub mod file;
pub mod memory;

pub use dir::{discover, load_dir, load_dir_parallel, DirOptions};
pub use file::FileSource;
pub use memory::MemorySource;

use netnorm_core::{normalize_table, Kind, LoadedTable, Normalized};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Trait implemented by each table source.
pub trait TableSource: Send + Sync {
    fn kind(&self) -> Kind;

    /// Human-readable origin for logs and skip lists.
    fn describe(&self) -> String;

    fn load(&self) -> netnorm_core::Result<LoadedTable>;
}

/// Merged result of normalizing several sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub normalized: Normalized,
    pub tables_loaded: usize,
    /// Sources that failed to load, as `(origin, reason)`.
    pub skipped: Vec<(String, String)>,
}

impl LoadOutcome {
    fn absorb(&mut self, origin: String, result: netnorm_core::Result<Normalized>) {
        match result {
            Ok(normalized) => {
                self.tables_loaded += 1;
                self.normalized.merge(normalized);
            }
            Err(err) => {
                tracing::warn!(source = %origin, error = %err, "skipping unreadable table");
                self.skipped.push((origin, err.to_string()));
            }
        }
    }
}

fn load_and_normalize(source: &dyn TableSource) -> netnorm_core::Result<Normalized> {
    source.load().map(|table| normalize_table(&table))
}

/// Load and normalize sources one after another, in order.
pub fn normalize_sources<S: TableSource>(sources: &[S]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    for source in sources {
        outcome.absorb(source.describe(), load_and_normalize(source));
    }
    outcome
}

/// Load and normalize each source on its own blocking task.
///
/// Each task owns its result; results are merged in source order
/// once all tasks finish, so the output matches [`normalize_sources`].
pub async fn normalize_sources_parallel(sources: Vec<Arc<dyn TableSource>>) -> LoadOutcome {
    let mut tasks = JoinSet::new();
    for (index, source) in sources.into_iter().enumerate() {
        tasks.spawn_blocking(move || {
            (index, source.describe(), load_and_normalize(source.as_ref()))
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    let mut outcome = LoadOutcome::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::warn!(error = %err, "table task did not complete");
                outcome.skipped.push(("<task>".to_string(), err.to_string()));
            }
        }
    }

    results.sort_by_key(|(index, _, _)| *index);
    for (_, origin, result) in results {
        outcome.absorb(origin, result);
    }
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
