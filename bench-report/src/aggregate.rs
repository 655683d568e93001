//! Building series from a Criterion output tree
//!
//! Cases that cannot be resolved are logged and left out of the series; only a
//! missing group directory stops aggregation.

use crate::case::{BenchmarkCase, Series, SweepKey};
use crate::error::{ReportError, Result};
use crate::extract::read_estimate;
use crate::locate::{case_dir, discover_cases, ensure_root, group_root, locate};
use crate::normalize::{UnitPolicy, normalize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads estimates below one results root
#[derive(Debug, Clone)]
pub struct Aggregator {
    results_root: PathBuf,
    policy: UnitPolicy,
}

impl Aggregator {
    pub fn new(results_root: impl Into<PathBuf>) -> Self {
        Self {
            results_root: results_root.into(),
            policy: UnitPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn results_root(&self) -> &Path {
        &self.results_root
    }

    fn require_group(&self, group: &str) -> Result<PathBuf> {
        let root = group_root(&self.results_root, group);
        ensure_root(&root)?;
        Ok(root)
    }

    /// Normalized estimate for one case, or `None` when it cannot be resolved
    pub fn resolve(&self, case: &BenchmarkCase) -> Option<f64> {
        let dir = case_dir(&self.results_root, case);
        let Some(found) = locate(&dir) else {
            warn!("Missing estimates for {}", case);
            return None;
        };

        let extracted = match read_estimate(&found.path) {
            Ok(Some(extracted)) => extracted,
            Ok(None) => {
                warn!("Could not find a point estimate for {}", case);
                return None;
            }
            Err(e) => {
                warn!("Skipping {}: {}", case, e);
                return None;
            }
        };

        debug!(
            "{}: {} = {} ({:?} layout)",
            case, extracted.source_name(), extracted.raw, found.layout
        );

        let seconds = normalize(extracted.raw, self.policy);
        if seconds.is_none() {
            warn!(
                "Ignoring invalid point estimate {} for {}",
                extracted.raw, case
            );
        }
        seconds
    }

    /// One bar per sub-case of `group`, sorted by name
    pub fn collect_cases(&self, group: &str) -> Result<Series<String>> {
        let root = self.require_group(group)?;
        let mut series = Series::new(group);

        for name in discover_cases(&root)? {
            let case = BenchmarkCase::group(group).with_sub_case(name.as_str());
            if let Some(seconds) = self.resolve(&case) {
                series.push(name, seconds);
            }
        }

        series.sort();
        Ok(series)
    }

    /// The group directory is itself the only case
    pub fn collect_single(&self, group: &str) -> Result<Series<String>> {
        self.require_group(group)?;
        let case = BenchmarkCase::group(group);
        let seconds = self
            .resolve(&case)
            .ok_or_else(|| ReportError::MissingEstimate(case.to_string()))?;

        let mut series = Series::new(group);
        series.push(group.to_string(), seconds);
        Ok(series)
    }

    /// Every case directory of `group` as one swept-parameter line.
    ///
    /// Directory names are parsed as the parameter value; names that are not
    /// integers get their 1-based ordinal in name order instead and the
    /// point is tagged as positional.
    pub fn collect_sweep(&self, group: &str) -> Result<Series<SweepKey>> {
        let root = self.require_group(group)?;
        let mut series = Series::new(group);

        for (idx, name) in discover_cases(&root)?.into_iter().enumerate() {
            let key = match name.parse::<u64>() {
                Ok(size) => SweepKey::size(size),
                Err(_) => {
                    let ordinal = idx as u64 + 1;
                    warn!(
                        "{}/{} is not a numeric parameter, plotting it at position {}",
                        group, name, ordinal
                    );
                    SweepKey::position(ordinal)
                }
            };

            let case = BenchmarkCase::group(group).with_param(name);
            if let Some(seconds) = self.resolve(&case) {
                series.push(key, seconds);
            }
        }

        series.sort();
        for x in positional_collisions(&series) {
            warn!(
                "{}: positional fallback {} coincides with a measured size, points overlap",
                group, x
            );
        }
        Ok(series)
    }

    /// One line per mode, each keyed by swept size in ascending order
    pub fn collect_modes(
        &self,
        group: &str,
        modes: &[&str],
        sizes: &[u64],
    ) -> Result<Vec<Series<u64>>> {
        self.require_group(group)?;

        let all = modes
            .iter()
            .map(|mode| {
                let mut series = Series::new(*mode);
                for &size in sizes {
                    let case = BenchmarkCase::group(group)
                        .with_sub_case(*mode)
                        .with_param(size.to_string());
                    if let Some(seconds) = self.resolve(&case) {
                        series.push(size, seconds);
                    }
                }
                series.sort();
                series
            })
            .collect();

        Ok(all)
    }
}

/// Positions that share an x value with a real measured size
fn positional_collisions(series: &Series<SweepKey>) -> Vec<u64> {
    let sizes: HashSet<u64> = series
        .keys()
        .filter(|k| !k.positional)
        .map(|k| k.value)
        .collect();
    series
        .keys()
        .filter(|k| k.positional && sizes.contains(&k.value))
        .map(|k| k.value)
        .collect()
}
