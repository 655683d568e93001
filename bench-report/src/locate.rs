//! Finding result files under a Criterion output tree
//!
//! Criterion writes one directory per benchmark case. Depending on the report
//! mode the point estimates live in `base/estimates.json` or, for the
//! alternate layout, in `new/benchmark.json`.

use crate::case::BenchmarkCase;
use crate::error::{ReportError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Criterion's own HTML report directory, never a benchmark case
pub const REPORT_DIR: &str = "report";

/// On-disk layout a result file was found under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLayout {
    /// `base/estimates.json`
    Base,
    /// `new/benchmark.json`
    New,
}

impl ResultLayout {
    /// Layouts in lookup order
    pub const ALL: [ResultLayout; 2] = [ResultLayout::Base, ResultLayout::New];

    pub fn relative_path(self) -> &'static Path {
        match self {
            ResultLayout::Base => Path::new("base/estimates.json"),
            ResultLayout::New => Path::new("new/benchmark.json"),
        }
    }
}

/// A result file that exists on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    pub layout: ResultLayout,
}

/// Fail if a required results directory is absent
pub fn ensure_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(ReportError::RootMissing(root.to_path_buf()))
    }
}

/// Directory holding every case of `group`
pub fn group_root(results_root: &Path, group: &str) -> PathBuf {
    results_root.join(group)
}

/// Directory of a single case below the results root
pub fn case_dir(results_root: &Path, case: &BenchmarkCase) -> PathBuf {
    case.components()
        .fold(results_root.to_path_buf(), |dir, part| dir.join(part))
}

/// Names of the case directories directly below `group_root`, sorted by name.
///
/// Files and the reserved `report` directory are skipped.
pub fn discover_cases(group_root: &Path) -> Result<Vec<String>> {
    ensure_root(group_root)?;

    let mut names = Vec::new();
    for entry in WalkDir::new(group_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == REPORT_DIR {
            continue;
        }
        names.push(name);
    }

    Ok(names)
}

/// Find the result file inside a case directory, primary layout first
pub fn locate(case_dir: &Path) -> Option<Located> {
    ResultLayout::ALL.into_iter().find_map(|layout| {
        let path = case_dir.join(layout.relative_path());
        path.is_file().then_some(Located { path, layout })
    })
}
