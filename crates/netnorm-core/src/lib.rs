//! netnorm-core: network log normalization core.
//!
//! This crate exposes the two pipeline stages as public modules, plus the
//! shared types, the table reader and writer, and configuration.
//!
//! # Architecture
//!
//! ```text
//! RawTable ──► Loader ──► Normalizer ──► UnifiedTable ──► consumers
//!                                              │
//!                                              └──► Export (CSV)
//! ```
//!
//! Everything here is synchronous and free of shared state; each source table
//! is loaded and normalized on its own and the results are concatenated.

pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod normalizer;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use loader::{LoadedTable, Loader, SchemaProfile};
pub use normalizer::{normalize_all, normalize_record, normalize_table, NormalizeReport, Normalized};
pub use table::RawTable;
pub use types::{Kind, RawRecord, UnifiedRecord, UnifiedTable, UNIFIED_COLUMNS};
