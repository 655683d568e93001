//! Unit inference for raw point estimates
//!
//! Result documents carry no unit field. Under [`UnitPolicy::Heuristic`] the
//! unit is guessed from magnitude alone: anything above one million is taken
//! as nanoseconds, above one thousand as microseconds, and everything else as
//! seconds already. Genuine second-valued estimates above 1000 are
//! misclassified; pin the unit with [`UnitPolicy::Fixed`] when the input is
//! known.

use std::fmt;

const NANOS_THRESHOLD: f64 = 1e6;
const MICROS_THRESHOLD: f64 = 1e3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Seconds,
}

impl TimeUnit {
    /// Guess the unit of a raw estimate from its magnitude
    pub fn classify(raw: f64) -> Self {
        if raw > NANOS_THRESHOLD {
            TimeUnit::Nanoseconds
        } else if raw > MICROS_THRESHOLD {
            TimeUnit::Microseconds
        } else {
            TimeUnit::Seconds
        }
    }

    /// Units of this kind per second
    pub fn per_second(self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1e9,
            TimeUnit::Microseconds => 1e6,
            TimeUnit::Seconds => 1.0,
        }
    }

    pub fn to_seconds(self, raw: f64) -> f64 {
        raw / self.per_second()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "µs",
            TimeUnit::Seconds => "s",
        })
    }
}

/// How the unit of a raw estimate is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitPolicy {
    /// Infer from magnitude
    #[default]
    Heuristic,
    /// Every raw value is in this unit
    Fixed(TimeUnit),
}

impl UnitPolicy {
    pub fn unit_for(self, raw: f64) -> TimeUnit {
        match self {
            UnitPolicy::Heuristic => TimeUnit::classify(raw),
            UnitPolicy::Fixed(unit) => unit,
        }
    }
}

/// Convert a raw estimate to seconds.
///
/// Negative and non-finite values have no meaningful duration and yield `None`.
pub fn normalize(raw: f64, policy: UnitPolicy) -> Option<f64> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    Some(policy.unit_for(raw).to_seconds(raw))
}

/// Heuristic conversion, the common case
pub fn to_seconds(raw: f64) -> Option<f64> {
    normalize(raw, UnitPolicy::Heuristic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nanosecond_range() {
        assert_eq!(TimeUnit::classify(2_500_000_000.0), TimeUnit::Nanoseconds);
        assert_relative_eq!(to_seconds(2_500_000_000.0).unwrap(), 2.5);
    }

    #[test]
    fn test_microsecond_range() {
        assert_eq!(TimeUnit::classify(4_200.0), TimeUnit::Microseconds);
        assert_relative_eq!(to_seconds(4_200.0).unwrap(), 0.0042);
    }

    #[test]
    fn test_seconds_unchanged() {
        assert_eq!(to_seconds(0.0037), Some(0.0037));
        assert_eq!(to_seconds(1000.0), Some(1000.0));
        assert_eq!(to_seconds(0.0), Some(0.0));
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(TimeUnit::classify(1_000_000.0), TimeUnit::Microseconds);
        assert_eq!(TimeUnit::classify(1_000.0), TimeUnit::Seconds);
        assert_eq!(TimeUnit::classify(1_000.5), TimeUnit::Microseconds);
    }

    #[test]
    fn test_idempotent_on_seconds_range() {
        for raw in [0.0001, 0.5, 12.0, 999.9, 1000.0] {
            let once = to_seconds(raw).unwrap();
            assert_eq!(to_seconds(once), Some(once));
        }
    }

    #[test]
    fn test_fixed_policy_overrides_heuristic() {
        let policy = UnitPolicy::Fixed(TimeUnit::Nanoseconds);
        assert_relative_eq!(normalize(500.0, policy).unwrap(), 5e-7);
        assert_eq!(normalize(2000.0, UnitPolicy::Fixed(TimeUnit::Seconds)), Some(2000.0));
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(to_seconds(-1.0), None);
        assert_eq!(to_seconds(f64::NAN), None);
        assert_eq!(to_seconds(f64::INFINITY), None);
    }
}
