//! Domain types for UpliftLab

pub mod metric;
pub mod scale;
pub mod snapshot;

pub use metric::MetricDefinition;
pub use scale::{AxisDomain, ConfidenceThresholds};
pub use snapshot::{ConfidenceInterval, SnapshotStat, UpliftDistribution};

/// Treat NaN and infinities as missing.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
