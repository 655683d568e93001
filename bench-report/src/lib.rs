//! Charts from Criterion benchmark results
//!
//! This crate reads the estimates Criterion leaves under `target/criterion`,
//! picks one representative point estimate per benchmark case, converts it to
//! seconds and renders comparison charts.
//!
//! # Pipeline
//!
//! - [`locate`]: find a case's result file (`base/estimates.json`, then
//!   `new/benchmark.json`)
//! - [`extract`]: pull a point estimate out of the result document
//! - [`normalize`]: infer the time unit and convert to seconds
//! - [`aggregate`]: build ordered series for a benchmark group
//! - [`render`]: draw bar and log-scale line charts to PNG
//! - [`report`]: the fixed set of reports tying the above together
//!
//! # Quick Start
//!
//! ```no_run
//! use bench_report::{ReportConfig, ReportKind, generate};
//!
//! let config = ReportConfig::default();
//! for path in generate(&ReportKind::ALL, &config)? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), bench_report::ReportError>(())
//! ```
//!
//! Working with a single group directly:
//!
//! ```no_run
//! use bench_report::Aggregator;
//! use bench_report::render::{BarChart, ChartOptions, render_chart};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let series = Aggregator::new("target/criterion").collect_cases("datetime_validation")?;
//! let options = ChartOptions::new().title("datetime_validation").build()?;
//! render_chart(&BarChart, &series, &options, Path::new("docs/bench_results"), "datetime_validation")?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod case;
pub mod error;
pub mod extract;
pub mod locate;
pub mod normalize;
pub mod render;
pub mod report;

pub use aggregate::Aggregator;
pub use case::{BenchmarkCase, Series, SweepKey};
pub use error::{ReportError, Result};
pub use extract::{EstimateSource, Extracted, extract_point_estimate};
pub use locate::{Located, ResultLayout, discover_cases, locate};
pub use normalize::{TimeUnit, UnitPolicy, normalize, to_seconds};
pub use report::{ReportConfig, ReportKind, generate};
