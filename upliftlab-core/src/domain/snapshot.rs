//! Per-arm statistical summaries as produced by the statistics engine.
//!
//! Every field is optional: the engine omits whatever it could not
//! compute, and nothing downstream may assume completeness.

use serde::{Deserialize, Serialize};

use super::finite;

/// Ordered `[lower, upper]` bounds on the relative uplift.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceInterval(pub f64, pub f64);

impl ConfidenceInterval {
    /// Zero-width placeholder drawn when a result is suppressed.
    pub const ZERO: Self = Self(0.0, 0.0);

    pub fn new(lower: f64, upper: f64) -> Self {
        Self(lower, upper)
    }

    pub fn lower(&self) -> f64 {
        self.0
    }

    pub fn upper(&self) -> f64 {
        self.1
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

/// Descriptor of a continuous uplift distribution (e.g. `lognormal`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpliftDistribution {
    #[serde(default)]
    pub dist: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default)]
    pub stddev: f64,
}

impl UpliftDistribution {
    pub fn new(dist: impl Into<String>, mean: f64, stddev: f64) -> Self {
        Self {
            dist: dist.into(),
            mean,
            stddev,
        }
    }

    /// A descriptor with an empty family name carries no distribution.
    /// Any non-empty name counts, whitespace included.
    pub fn is_present(&self) -> bool {
        !self.dist.is_empty()
    }
}

/// Statistical summary of one arm for one metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStat {
    /// Metric total (conversions, count, or sum) for this arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Conversion rate of this arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<ConfidenceInterval>,
    /// Point estimate of relative uplift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplift: Option<UpliftDistribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance_to_win: Option<f64>,
}

impl SnapshotStat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_cr(mut self, cr: f64) -> Self {
        self.cr = Some(cr);
        self
    }

    pub fn with_ci(mut self, lower: f64, upper: f64) -> Self {
        self.ci = Some(ConfidenceInterval::new(lower, upper));
        self
    }

    pub fn with_expected(mut self, expected: f64) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_uplift(mut self, uplift: UpliftDistribution) -> Self {
        self.uplift = Some(uplift);
        self
    }

    pub fn with_chance_to_win(mut self, chance_to_win: f64) -> Self {
        self.chance_to_win = Some(chance_to_win);
        self
    }

    /// The uplift distribution, only if it actually names one.
    pub fn distribution(&self) -> Option<&UpliftDistribution> {
        self.uplift.as_ref().filter(|u| u.is_present())
    }

    pub(crate) fn finite_value(&self) -> Option<f64> {
        finite(self.value)
    }

    pub(crate) fn finite_cr(&self) -> Option<f64> {
        finite(self.cr)
    }
}
