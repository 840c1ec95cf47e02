//! Configuration types for netnorm.
//!
//! [`Config::load`] layers an optional TOML file on top of the embedded
//! defaults: an explicit path must exist, the default
//! `~/.config/netnorm/config.toml` may be missing. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[report]
bucket_width = "30S"
top_n        = 8
excluded_protocols = [
    "tcp",
    "udp",
    "icmp",
    "arp",
    "unknown_transport",
    "unknown_protocol",
    "unknown_service",
    "unknown_log_type",
]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// Every field is required at deserialization time; the embedded defaults are
/// always the bottom layer, so a user file only has to name what it changes.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub report: ReportConfig,
}

/// `[report]` section: the knobs of the aggregation consumers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Width of time buckets for the event counter, e.g. `"30S"`, `"5min"`.
    pub bucket_width: String,
    /// Labels left out of the protocol-share breakdown.
    pub excluded_protocols: Vec<String>,
    /// Categories kept before the rest collapses into `other`.
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Config::defaults().report
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load `path` (or the default location when `None`) on top of the
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };
        tracing::debug!(path = %path.display(), required, "loading config");

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("netnorm")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
