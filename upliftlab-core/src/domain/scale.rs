use serde::{Deserialize, Serialize};

use super::ConfidenceInterval;

/// Win-probability cutoffs for the two-tailed significance test.
///
/// Normally `ci_lower < ci_upper`, but nothing here enforces it: the
/// settings layer validates what it loads, and the classifier evaluates
/// whatever pair it is handed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceThresholds {
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl ConfidenceThresholds {
    pub fn new(ci_lower: f64, ci_upper: f64) -> Self {
        Self { ci_lower, ci_upper }
    }

    /// Symmetric cutoffs for a confidence level: `(1 - level, level)`.
    pub fn from_confidence_level(level: f64) -> Self {
        Self {
            ci_lower: 1.0 - level,
            ci_upper: level,
        }
    }
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self::new(0.05, 0.95)
    }
}

/// Shared horizontal scale for every graph in a results column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AxisDomain(pub f64, pub f64);

impl AxisDomain {
    /// Used when no row in a column has a drawable interval.
    pub const FALLBACK: Self = Self(-1.0, 1.0);

    pub fn new(min: f64, max: f64) -> Self {
        Self(min, max)
    }

    pub fn min(&self) -> f64 {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.1
    }

    /// Smallest domain containing both `self` and `interval`.
    pub fn widened_to(self, interval: &ConfidenceInterval) -> Self {
        Self(self.min().min(interval.lower()), self.max().max(interval.upper()))
    }
}
