//! Visibility policy: decides whether a result is trustworthy enough to draw.
//!
//! The two underlying checks (is there enough data, is the change
//! implausibly large) live behind [`DataQualityOracle`] so the policy can
//! be driven by the production checks or by a fixed stand-in. The policy
//! itself only combines their verdicts:
//!
//! ```text
//! visible = metric present && enough_data && !suspicious_uplift
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{MetricDefinition, SnapshotStat};

/// Outcome of the sufficiency and anomaly checks for one metric row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub enough_data: bool,
    pub suspicious_uplift: bool,
}

impl QualityVerdict {
    pub fn new(enough_data: bool, suspicious_uplift: bool) -> Self {
        Self {
            enough_data,
            suspicious_uplift,
        }
    }
}

/// Injected sufficiency/anomaly checks.
///
/// Implementations must be pure: the same inputs always produce the same
/// verdict, so assembling a column twice yields identical output.
pub trait DataQualityOracle: Send + Sync {
    /// Human-readable name (e.g., "sample_size").
    fn name(&self) -> &str;

    /// Evaluate both checks for a baseline/variant pair.
    fn evaluate(
        &self,
        baseline: &SnapshotStat,
        variant: &SnapshotStat,
        metric: &MetricDefinition,
    ) -> QualityVerdict;
}

/// Why a row is (or is not) drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    MissingMetric,
    NotEnoughData,
    SuspiciousUplift,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::MissingMetric => "missing metric",
            Visibility::NotEnoughData => "not enough data",
            Visibility::SuspiciousUplift => "suspicious uplift",
        }
    }
}

/// Classify a row. Insufficient data is reported ahead of a suspicious change.
pub fn assess(
    oracle: &dyn DataQualityOracle,
    baseline: &SnapshotStat,
    variant: &SnapshotStat,
    metric: Option<&MetricDefinition>,
) -> Visibility {
    let Some(metric) = metric else {
        return Visibility::MissingMetric;
    };
    let verdict = oracle.evaluate(baseline, variant, metric);
    if !verdict.enough_data {
        Visibility::NotEnoughData
    } else if verdict.suspicious_uplift {
        Visibility::SuspiciousUplift
    } else {
        Visibility::Visible
    }
}

/// True only when the metric exists, there is enough data, and the change
/// is not suspicious.
pub fn decide(
    oracle: &dyn DataQualityOracle,
    baseline: &SnapshotStat,
    variant: &SnapshotStat,
    metric: Option<&MetricDefinition>,
) -> bool {
    assess(oracle, baseline, variant, metric).is_visible()
}

// ─── Default oracle ──────────────────────────────────────────────────

/// Fallback cutoffs used when a metric does not set its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityDefaults {
    pub min_sample_size: f64,
    pub max_percent_change: f64,
}

impl Default for QualityDefaults {
    fn default() -> Self {
        Self {
            min_sample_size: 150.0,
            max_percent_change: 0.5,
        }
    }
}

/// Production checks: a minimum metric total on the larger arm, and a cap on
/// the relative change in conversion rate.
#[derive(Debug, Clone, Default)]
pub struct SampleSizeOracle {
    defaults: QualityDefaults,
}

impl SampleSizeOracle {
    pub fn new(defaults: QualityDefaults) -> Self {
        Self { defaults }
    }

    /// Missing or zero totals on either arm never count as enough.
    pub fn has_enough_data(
        &self,
        baseline: &SnapshotStat,
        variant: &SnapshotStat,
        metric: &MetricDefinition,
    ) -> bool {
        let base = nonzero(baseline.finite_value());
        let var = nonzero(variant.finite_value());
        let (Some(base), Some(var)) = (base, var) else {
            return false;
        };
        let min_sample_size = metric
            .min_sample_size_override()
            .unwrap_or(self.defaults.min_sample_size);
        base.max(var) >= min_sample_size
    }

    /// Without a conversion rate on both arms there is nothing to flag.
    pub fn is_suspicious_uplift(
        &self,
        baseline: &SnapshotStat,
        variant: &SnapshotStat,
        metric: &MetricDefinition,
    ) -> bool {
        let base = nonzero(baseline.finite_cr());
        let var = nonzero(variant.finite_cr());
        let (Some(base), Some(var)) = (base, var) else {
            return false;
        };
        let max_percent_change = metric
            .max_percent_change_override()
            .unwrap_or(self.defaults.max_percent_change);
        (base - var).abs() / base >= max_percent_change
    }
}

impl DataQualityOracle for SampleSizeOracle {
    fn name(&self) -> &str {
        "sample_size"
    }

    fn evaluate(
        &self,
        baseline: &SnapshotStat,
        variant: &SnapshotStat,
        metric: &MetricDefinition,
    ) -> QualityVerdict {
        QualityVerdict::new(
            self.has_enough_data(baseline, variant, metric),
            self.is_suspicious_uplift(baseline, variant, metric),
        )
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
