//! Fixture trees shaped like Criterion's output directory

use std::fs;
use std::path::{Path, PathBuf};

/// `base/estimates.json` as Criterion writes it, with mean and median in nanoseconds
pub fn estimates_json(mean: f64, median: f64) -> String {
    format!(
        r#"{{
  "mean": {{"confidence_interval": {{"confidence_level": 0.95, "lower_bound": {mean}, "upper_bound": {mean}}}, "point_estimate": {mean}, "standard_error": 1.0}},
  "median": {{"confidence_interval": {{"confidence_level": 0.95, "lower_bound": {median}, "upper_bound": {median}}}, "point_estimate": {median}, "standard_error": 1.0}},
  "median_abs_dev": {{"point_estimate": 3.0}},
  "slope": null,
  "std_dev": {{"point_estimate": 5.0}}
}}"#
    )
}

pub struct Fixture {
    _dir: tempfile::TempDir,
    pub results_root: PathBuf,
    pub out_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let results_root = dir.path().join("target/criterion");
        let out_dir = dir.path().join("docs/bench_results");
        fs::create_dir_all(&results_root).expect("create results root");
        Self {
            _dir: dir,
            results_root,
            out_dir,
        }
    }

    /// Write `content` to `<results_root>/<case>/<relative>`
    pub fn write(&self, case: &str, relative: &str, content: &str) -> PathBuf {
        let path = self.results_root.join(case).join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create case dir");
        fs::write(&path, content).expect("write result file");
        path
    }

    /// Primary-layout estimates for `case` with the given median
    pub fn base_estimate(&self, case: &str, median: f64) -> PathBuf {
        self.write(case, "base/estimates.json", &estimates_json(median * 1.1, median))
    }

    pub fn mkdir(&self, case: &str) {
        fs::create_dir_all(self.results_root.join(case)).expect("create dir");
    }

    pub fn root(&self) -> &Path {
        &self.results_root
    }
}
