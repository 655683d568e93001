//! Benchmark case identity and series containers

use std::fmt;

/// One measured scenario: a benchmark group, an optional sub-case label and
/// an optional swept parameter (kept as the on-disk directory name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BenchmarkCase {
    pub group: String,
    pub sub_case: Option<String>,
    pub param: Option<String>,
}

impl BenchmarkCase {
    /// A case whose results live directly under the group directory
    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            sub_case: None,
            param: None,
        }
    }

    pub fn with_sub_case(mut self, sub_case: impl Into<String>) -> Self {
        self.sub_case = Some(sub_case.into());
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Path components below the results root, in order
    pub fn components(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.group.as_str())
            .chain(self.sub_case.as_deref())
            .chain(self.param.as_deref())
    }
}

impl fmt::Display for BenchmarkCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in self.components() {
            if !first {
                f.write_str("/")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

/// X-axis key of a swept-parameter point.
///
/// `positional` is set when the case directory name was not an integer and
/// `value` is the 1-based ordinal of that directory in enumeration order
/// instead of a real parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SweepKey {
    pub value: u64,
    pub positional: bool,
}

impl SweepKey {
    pub fn size(value: u64) -> Self {
        Self {
            value,
            positional: false,
        }
    }

    pub fn position(ordinal: u64) -> Self {
        Self {
            value: ordinal,
            positional: true,
        }
    }
}

impl From<u64> for SweepKey {
    fn from(value: u64) -> Self {
        Self::size(value)
    }
}

/// Ordered (key, seconds) points for one bar group or one plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Series<K> {
    pub label: String,
    pub points: Vec<(K, f64)>,
}

impl<K: Ord> Series<K> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// Append a point; values must already be normalized to seconds
    pub fn push(&mut self, key: K, seconds: f64) {
        self.points.push((key, seconds));
    }

    /// Stable sort ascending by key
    pub fn sort(&mut self) {
        self.points.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.points.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.points.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    /// Same points and label under a different key type
    pub fn map_keys<J: Ord>(self, f: impl Fn(K) -> J) -> Series<J> {
        Series {
            label: self.label,
            points: self.points.into_iter().map(|(k, v)| (f(k), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_display_joins_components() {
        let case = BenchmarkCase::group("duckdb_write_modes")
            .with_sub_case("csv_copy")
            .with_param("10000");
        assert_eq!(case.to_string(), "duckdb_write_modes/csv_copy/10000");
        assert_eq!(BenchmarkCase::group("g").to_string(), "g");
    }

    #[test]
    fn test_series_sort_is_by_key() {
        let mut series = Series::new("s");
        series.push(200_000u64, 3.0);
        series.push(10_000u64, 1.0);
        series.push(50_000u64, 2.0);
        series.sort();
        assert_eq!(
            series.keys().copied().collect::<Vec<_>>(),
            vec![10_000, 50_000, 200_000]
        );
        assert_eq!(series.get(&50_000), Some(2.0));
    }

    #[test]
    fn test_sweep_keys_order_by_value() {
        let mut series = Series::new("sweep");
        series.push(SweepKey::size(50), 0.2);
        series.push(SweepKey::position(3), 0.1);
        series.sort();
        assert_eq!(series.points[0].0, SweepKey::position(3));
        assert!(series.points[0].0.positional);

        let sizes = series.map_keys(|k| k.value);
        assert_eq!(sizes.keys().copied().collect::<Vec<_>>(), vec![3, 50]);
    }
}
