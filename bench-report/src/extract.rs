//! Point estimate extraction from Criterion result documents
//!
//! The shape of these documents differs between report modes and Criterion
//! versions, so extraction walks an ordered list of candidates:
//!
//! 1. `median`
//! 2. `mean`
//! 3. the first other top-level object, in document order
//!
//! A candidate matches when it is an object with a numeric `point_estimate`.

use crate::error::{ReportError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const POINT_ESTIMATE: &str = "point_estimate";

/// Which part of the document supplied the estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateSource {
    Median,
    Mean,
    /// Found by the document-order scan under this key
    Scanned(String),
}

/// Raw, unit-less estimate and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub raw: f64,
    pub source: EstimateSource,
}

impl Extracted {
    /// Key of the statistic that supplied the value
    pub fn source_name(&self) -> &str {
        match &self.source {
            EstimateSource::Median => "median",
            EstimateSource::Mean => "mean",
            EstimateSource::Scanned(key) => key,
        }
    }
}

/// The part of a Criterion statistic we care about
#[derive(Debug, Deserialize)]
struct Statistic {
    point_estimate: f64,
}

fn point_estimate(value: &Value) -> Option<f64> {
    let obj = value.as_object()?;
    if !obj.get(POINT_ESTIMATE).is_some_and(Value::is_number) {
        return None;
    }
    Statistic::deserialize(value).ok().map(|s| s.point_estimate)
}

/// Pick the representative point estimate out of a parsed result document
pub fn extract_point_estimate(doc: &Value) -> Option<Extracted> {
    let obj = doc.as_object()?;

    for (key, source) in [("median", EstimateSource::Median), ("mean", EstimateSource::Mean)] {
        if let Some(raw) = obj.get(key).and_then(point_estimate) {
            return Some(Extracted { raw, source });
        }
    }

    obj.iter().find_map(|(key, value)| {
        point_estimate(value).map(|raw| Extracted {
            raw,
            source: EstimateSource::Scanned(key.clone()),
        })
    })
}

/// Read and parse a result file
pub fn read_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a result file and extract its point estimate.
///
/// `Ok(None)` means the file parsed but held no recognizable estimate.
pub fn read_estimate(path: &Path) -> Result<Option<Extracted>> {
    let doc = read_document(path)?;
    Ok(extract_point_estimate(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn criterion_estimates() -> Value {
        json!({
            "mean": {
                "confidence_interval": {
                    "confidence_level": 0.95,
                    "lower_bound": 4100.0,
                    "upper_bound": 4300.0
                },
                "point_estimate": 4210.5,
                "standard_error": 12.0
            },
            "median": {
                "confidence_interval": {
                    "confidence_level": 0.95,
                    "lower_bound": 4000.0,
                    "upper_bound": 4250.0
                },
                "point_estimate": 4150.25,
                "standard_error": 9.5
            },
            "median_abs_dev": { "point_estimate": 30.0 },
            "slope": null,
            "std_dev": { "point_estimate": 55.0 }
        })
    }

    #[test]
    fn test_median_preferred() {
        let got = extract_point_estimate(&criterion_estimates()).unwrap();
        assert_eq!(got.raw, 4150.25);
        assert_eq!(got.source, EstimateSource::Median);
    }

    #[test]
    fn test_mean_when_no_median() {
        let mut doc = criterion_estimates();
        doc.as_object_mut().unwrap().remove("median");
        let got = extract_point_estimate(&doc).unwrap();
        assert_eq!(got.raw, 4210.5);
        assert_eq!(got.source, EstimateSource::Mean);
    }

    #[test]
    fn test_median_without_point_estimate_falls_through() {
        let doc = json!({
            "median": { "lower_bound": 1.0 },
            "mean": { "point_estimate": 2.0 }
        });
        let got = extract_point_estimate(&doc).unwrap();
        assert_eq!(got.raw, 2.0);
        assert_eq!(got.source, EstimateSource::Mean);
    }

    #[test]
    fn test_scan_takes_first_statistic_in_document_order() {
        let doc: Value = serde_json::from_str(
            r#"{"typical": {"point_estimate": 4200.0}, "std_dev": {"point_estimate": 55.0}}"#,
        )
        .unwrap();
        let got = extract_point_estimate(&doc).unwrap();
        assert_eq!(got.raw, 4200.0);
        assert_eq!(got.source, EstimateSource::Scanned("typical".into()));
        let seconds = crate::normalize::to_seconds(got.raw).unwrap();
        assert!((seconds - 0.0042).abs() < 1e-12);
    }

    #[test]
    fn test_generic_scan_uses_document_order() {
        let doc: Value = serde_json::from_str(
            r#"{"group_id": "g", "zeta": {"point_estimate": 1.5}, "alpha": {"point_estimate": 7.0}}"#,
        )
        .unwrap();
        let got = extract_point_estimate(&doc).unwrap();
        assert_eq!(got.raw, 1.5);
        assert_eq!(got.source, EstimateSource::Scanned("zeta".into()));
    }

    #[test]
    fn test_unresolved_documents() {
        assert_eq!(extract_point_estimate(&json!({})), None);
        assert_eq!(extract_point_estimate(&json!([1, 2, 3])), None);
        assert_eq!(
            extract_point_estimate(&json!({"median": {"point_estimate": "fast"}})),
            None
        );
        assert_eq!(
            extract_point_estimate(&json!({"group_id": "g", "throughput": null})),
            None
        );
    }

    #[test]
    fn test_integer_point_estimate() {
        let got = extract_point_estimate(&json!({"median": {"point_estimate": 2500000000u64}}))
            .unwrap();
        assert_eq!(got.raw, 2.5e9);
    }

    #[test]
    fn test_read_estimate_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimates.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_estimate(&path),
            Err(ReportError::Json { .. })
        ));
    }
}
