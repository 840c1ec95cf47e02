//! netnorm report: aggregation consumers over the unified table.
//!
//! Two read-only consumers: the time-bucketed event counter ([`bucket`]) and
//! the protocol-share aggregator ([`share`]). [`run`] wires a directory load
//! through both and renders the result.

pub mod bucket;
pub mod render;
pub mod share;

pub use bucket::{count_by_bucket, Bucket, BucketWidth};
pub use render::{render_text, Report};
pub use share::{protocol_share, ShareOptions, ShareSlice, OTHER_LABEL};

use anyhow::Context;
use netnorm_core::config::ReportConfig;
use netnorm_core::Kind;
use netnorm_sources::{load_dir, load_dir_parallel, DirOptions, LoadOutcome};
use std::path::PathBuf;

/// Everything one invocation needs, after CLI and config have been merged.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dir: PathBuf,
    pub kind: Option<Kind>,
    pub report: ReportConfig,
    /// Worker threads for table loading; 1 loads sequentially.
    pub jobs: usize,
    /// Write the unified table here as CSV.
    pub out: Option<PathBuf>,
    /// Write the JSON report here.
    pub report_path: Option<PathBuf>,
}

/// Load, normalize, aggregate, and print. Returns the report for callers that
/// want it.
pub fn run(options: &RunOptions) -> anyhow::Result<Report> {
    let width = BucketWidth::parse(&options.report.bucket_width)?;
    let outcome = load(options)?;

    if let Some(path) = &options.out {
        outcome.normalized.table.write_csv(path)?;
    }

    let table = &outcome.normalized.table;
    let report = Report {
        tables_loaded: outcome.tables_loaded,
        tables_skipped: outcome.skipped.len(),
        normalize: outcome.normalized.report,
        bucket_width: options.report.bucket_width.clone(),
        events_over_time: count_by_bucket(table, width),
        protocol_share: protocol_share(table, &ShareOptions::from(&options.report)),
    };
    tracing::info!(
        tables = report.tables_loaded,
        rows = table.len(),
        buckets = report.events_over_time.len(),
        protocols = report.protocol_share.len(),
        "report ready"
    );

    if let Some(path) = &options.report_path {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }
    print!("{}", render_text(&report));
    Ok(report)
}

fn load(options: &RunOptions) -> anyhow::Result<LoadOutcome> {
    let dir_options = DirOptions {
        kind: options.kind.clone(),
    };
    if options.jobs <= 1 {
        return Ok(load_dir(&options.dir, &dir_options)?);
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(options.jobs)
        .max_blocking_threads(options.jobs)
        .build()
        .context("starting loader runtime")?;
    Ok(runtime.block_on(load_dir_parallel(&options.dir, &dir_options))?)
}
