use anyhow::Result;
use bench_report::report::{DEFAULT_OUT_DIR, DEFAULT_RESULTS_ROOT};
use bench_report::{ReportConfig, ReportKind, TimeUnit, UnitPolicy, generate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

const MAX_IMAGE_SIDE: i64 = 16_384;

/// Render comparison charts from Criterion benchmark results
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "bench-report")]
struct Cli {
    /// Criterion output directory
    #[arg(long, value_name = "DIR", default_value = DEFAULT_RESULTS_ROOT)]
    results_root: PathBuf,

    /// Directory to write chart images to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Reports to generate (comma-separated)
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "all")]
    report: Vec<ReportArg>,

    /// Image width in pixels
    #[arg(long, default_value = "1200", value_parser = clap::value_parser!(u32).range(1..=MAX_IMAGE_SIDE))]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", value_parser = clap::value_parser!(u32).range(1..=MAX_IMAGE_SIDE))]
    height: u32,

    /// Unit of the raw point estimates (default: inferred from magnitude)
    #[arg(short, long, value_enum, default_value = "auto")]
    unit: UnitArg,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ReportArg {
    /// Every report below
    All,
    /// Bar chart of datetime_validation variants
    Datetime,
    /// DuckDB write modes across record counts
    Duckdb,
    /// Single sqllog_from_file_1m benchmark
    Sqllog,
    /// sqllog_write_file / sqllog_parse_file sweeps
    Varied,
}

impl ReportArg {
    fn kinds(self) -> &'static [ReportKind] {
        match self {
            ReportArg::All => &ReportKind::ALL,
            ReportArg::Datetime => &[ReportKind::DatetimeValidation],
            ReportArg::Duckdb => &[ReportKind::DuckdbWriteModes],
            ReportArg::Sqllog => &[ReportKind::SqllogFromFile],
            ReportArg::Varied => &[ReportKind::SqllogVaried],
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum UnitArg {
    /// Guess from magnitude
    Auto,
    Ns,
    Us,
    S,
}

impl From<UnitArg> for UnitPolicy {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Auto => UnitPolicy::Heuristic,
            UnitArg::Ns => UnitPolicy::Fixed(TimeUnit::Nanoseconds),
            UnitArg::Us => UnitPolicy::Fixed(TimeUnit::Microseconds),
            UnitArg::S => UnitPolicy::Fixed(TimeUnit::Seconds),
        }
    }
}

/// Requested reports in catalogue order, without duplicates
fn selected_kinds(args: &[ReportArg]) -> Vec<ReportKind> {
    ReportKind::ALL
        .into_iter()
        .filter(|kind| args.iter().any(|arg| arg.kinds().contains(kind)))
        .collect()
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber with environment filter
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let start_time = Instant::now();

    let kinds = selected_kinds(&args.report);
    debug!("Selected reports: {:?}", kinds);

    let config = ReportConfig {
        results_root: args.results_root,
        out_dir: args.out_dir,
        width: args.width,
        height: args.height,
        unit_policy: args.unit.into(),
    };

    let written = generate(&kinds, &config)?;

    info!(
        "Wrote {} chart(s) to {} in {:.2}s",
        written.len(),
        config.out_dir.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
