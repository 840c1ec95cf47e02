use anyhow::Context;
use clap::Parser;
use netnorm_core::config::Config;
use netnorm_core::Kind;
use netnorm_report::RunOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netnorm", about = "Normalize network-monitor logs into one unified table")]
struct Cli {
    /// Directory of log tables (`conn.log.csv`, `dns.log`, …).
    dir: PathBuf,

    /// Time bucket width for the event counter, e.g. 30S, 5min, 1H.
    #[arg(long)]
    bucket: Option<String>,

    /// Comma-separated protocol labels to leave out of the share breakdown.
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Keep this many protocols before folding the rest into `other`.
    #[arg(long)]
    top_n: Option<usize>,

    /// Only load tables of this kind (e.g. `conn`).
    #[arg(long)]
    kind: Option<String>,

    /// Write the unified table as CSV.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the aggregates as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Config file (defaults to ~/.config/netnorm/config.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load tables on this many threads.
    #[arg(long, default_value_t = 1)]
    jobs: usize,

    /// Write debug logs to /tmp/netnorm-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/netnorm-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("netnorm debug log started, tail -f /tmp/netnorm-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let mut report = Config::load(cli.config.as_deref())
        .context("loading configuration")?
        .report;
    if let Some(bucket) = cli.bucket {
        report.bucket_width = bucket;
    }
    if let Some(exclude) = cli.exclude {
        report.excluded_protocols = exclude;
    }
    if let Some(top_n) = cli.top_n {
        report.top_n = top_n;
    }

    netnorm_report::run(&RunOptions {
        dir: cli.dir,
        kind: cli.kind.map(Kind::new),
        report,
        jobs: cli.jobs,
        out: cli.out,
        report_path: cli.report,
    })?;
    Ok(())
}
