//! The fixed set of benchmark reports
//!
//! Each report knows its Criterion group names, expected modes and sizes, and
//! how its chart is labelled. Generation happens in two passes: every chart's
//! series is collected first, so a fatal condition (missing results root,
//! single-case report with no estimate) stops the run before any image is
//! written; then every chart is rendered.

use crate::aggregate::Aggregator;
use crate::case::{Series, SweepKey};
use crate::error::{ReportError, Result};
use crate::locate::{ensure_root, group_root};
use crate::normalize::UnitPolicy;
use crate::render::{BarChart, ChartOptions, LineChart, render_chart};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_RESULTS_ROOT: &str = "target/criterion";
pub const DEFAULT_OUT_DIR: &str = "docs/bench_results";

pub const DATETIME_GROUP: &str = "datetime_validation";

pub const DUCKDB_GROUP: &str = "duckdb_write_modes";
pub const DUCKDB_MODES: [&str; 3] = ["appender_direct", "in_memory_ctas", "csv_copy"];
pub const DUCKDB_SIZES: [u64; 3] = [10_000, 50_000, 200_000];

pub const SQLLOG_SINGLE_GROUP: &str = "sqllog_from_file_1m";

/// Sweep groups plotted by the varied report; each is optional
pub const SQLLOG_SWEEP_GROUPS: [&str; 2] = ["sqllog_write_file", "sqllog_parse_file"];

const RECORDS_DESC: &str = "Number of records";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Bar chart of every datetime validation variant
    DatetimeValidation,
    /// DuckDB write modes overlaid across record counts
    DuckdbWriteModes,
    /// The single one-million-record parse benchmark
    SqllogFromFile,
    /// One line chart per sqllog sweep group
    SqllogVaried,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::DatetimeValidation,
        ReportKind::DuckdbWriteModes,
        ReportKind::SqllogFromFile,
        ReportKind::SqllogVaried,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::DatetimeValidation => DATETIME_GROUP,
            ReportKind::DuckdbWriteModes => DUCKDB_GROUP,
            ReportKind::SqllogFromFile => SQLLOG_SINGLE_GROUP,
            ReportKind::SqllogVaried => "sqllog_varied",
        }
    }

    /// Groups whose absence aborts the run
    pub fn required_groups(self) -> &'static [&'static str] {
        match self {
            ReportKind::DatetimeValidation => &[DATETIME_GROUP],
            ReportKind::DuckdbWriteModes => &[DUCKDB_GROUP],
            ReportKind::SqllogFromFile => &[SQLLOG_SINGLE_GROUP],
            ReportKind::SqllogVaried => &[],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invocation-time settings shared by every report
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Criterion output directory
    pub results_root: PathBuf,
    /// Where chart images are written
    pub out_dir: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// How raw estimates are converted to seconds
    pub unit_policy: UnitPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from(DEFAULT_RESULTS_ROOT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            width: 1200,
            height: 600,
            unit_policy: UnitPolicy::Heuristic,
        }
    }
}

impl ReportConfig {
    fn options(&self, title: &str, x_desc: Option<&str>) -> Result<ChartOptions> {
        let mut builder = ChartOptions::new();
        builder.title(title).width(self.width).height(self.height);
        if let Some(x_desc) = x_desc {
            builder.x_desc(x_desc);
        }
        builder
            .build()
            .map_err(|e| ReportError::Options(e.to_string()))
    }
}

#[derive(Debug)]
enum ChartData {
    Bars(Series<String>),
    Lines(Vec<Series<SweepKey>>),
}

/// A chart whose data has been collected but not yet drawn
#[derive(Debug)]
struct PlannedChart {
    name: String,
    options: ChartOptions,
    data: ChartData,
}

impl PlannedChart {
    fn render(&self, out_dir: &Path) -> Result<PathBuf> {
        match &self.data {
            ChartData::Bars(series) => {
                render_chart(&BarChart, series, &self.options, out_dir, &self.name)
            }
            ChartData::Lines(series) => {
                render_chart(&LineChart, series.as_slice(), &self.options, out_dir, &self.name)
            }
        }
    }
}

fn plan(
    kind: ReportKind,
    aggregator: &Aggregator,
    config: &ReportConfig,
) -> Result<Vec<PlannedChart>> {
    let charts = match kind {
        ReportKind::DatetimeValidation => {
            let series = aggregator.collect_cases(DATETIME_GROUP)?;
            info!("{}: {} case(s) resolved", DATETIME_GROUP, series.len());
            vec![PlannedChart {
                name: DATETIME_GROUP.to_string(),
                options: config.options("datetime_validation benchmarks (median)", None)?,
                data: ChartData::Bars(series),
            }]
        }
        ReportKind::DuckdbWriteModes => {
            let series: Vec<Series<SweepKey>> = aggregator
                .collect_modes(DUCKDB_GROUP, &DUCKDB_MODES, &DUCKDB_SIZES)?
                .into_iter()
                .map(|s| s.map_keys(SweepKey::size))
                .collect();
            vec![PlannedChart {
                name: DUCKDB_GROUP.to_string(),
                options: config.options("DuckDB write modes - median time", Some(RECORDS_DESC))?,
                data: ChartData::Lines(series),
            }]
        }
        ReportKind::SqllogFromFile => {
            let series = aggregator.collect_single(SQLLOG_SINGLE_GROUP)?;
            vec![PlannedChart {
                name: SQLLOG_SINGLE_GROUP.to_string(),
                options: config.options(SQLLOG_SINGLE_GROUP, None)?,
                data: ChartData::Bars(series),
            }]
        }
        ReportKind::SqllogVaried => {
            let mut charts = Vec::new();
            for group in SQLLOG_SWEEP_GROUPS {
                if !group_root(aggregator.results_root(), group).is_dir() {
                    warn!("No group {}", group);
                    continue;
                }
                let series = aggregator.collect_sweep(group)?;
                charts.push(PlannedChart {
                    name: group.to_string(),
                    options: config.options(group, Some(RECORDS_DESC))?,
                    data: ChartData::Lines(vec![series]),
                });
            }
            charts
        }
    };

    Ok(charts)
}

/// Generate the given reports, returning every image written.
///
/// Fails without writing anything if the results root or any required group
/// directory is missing.
pub fn generate(kinds: &[ReportKind], config: &ReportConfig) -> Result<Vec<PathBuf>> {
    ensure_root(&config.results_root)?;
    for kind in kinds {
        for group in kind.required_groups() {
            ensure_root(&group_root(&config.results_root, group))?;
        }
    }

    let aggregator =
        Aggregator::new(config.results_root.clone()).with_policy(config.unit_policy);

    let mut planned = Vec::new();
    for &kind in kinds {
        planned.extend(plan(kind, &aggregator, config)?);
    }

    planned
        .iter()
        .map(|chart| chart.render(&config.out_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_groups() {
        assert_eq!(
            ReportKind::DuckdbWriteModes.required_groups(),
            &["duckdb_write_modes"]
        );
        assert!(ReportKind::SqllogVaried.required_groups().is_empty());
    }

    #[test]
    fn test_report_names_unique() {
        let mut names: Vec<_> = ReportKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ReportKind::ALL.len());
    }

    #[test]
    fn test_options_carry_config_size() {
        let config = ReportConfig {
            width: 800,
            height: 400,
            ..Default::default()
        };
        let options = config.options("t", Some(RECORDS_DESC)).unwrap();
        assert_eq!((options.width, options.height), (800, 400));
        assert_eq!(options.x_desc.as_deref(), Some(RECORDS_DESC));
    }

    #[test]
    fn test_missing_root_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            results_root: dir.path().join("criterion"),
            out_dir: dir.path().join("out"),
            ..Default::default()
        };

        let err = generate(&ReportKind::ALL, &config).unwrap_err();
        assert!(matches!(err, ReportError::RootMissing(_)));
        assert!(!config.out_dir.exists());
    }

    #[test]
    fn test_missing_required_group_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let results_root = dir.path().join("criterion");
        std::fs::create_dir_all(results_root.join(DATETIME_GROUP)).unwrap();
        let config = ReportConfig {
            results_root,
            out_dir: dir.path().join("out"),
            ..Default::default()
        };

        let err = generate(
            &[ReportKind::DatetimeValidation, ReportKind::DuckdbWriteModes],
            &config,
        )
        .unwrap_err();
        match err {
            ReportError::RootMissing(path) => assert!(path.ends_with(DUCKDB_GROUP)),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!config.out_dir.exists());
    }
}
