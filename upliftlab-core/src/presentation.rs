//! Presentation assembly: merges visibility, encoding, and significance into
//! the parameter bundle handed to the graph renderer.
//!
//! A suppressed row collapses every data-bearing field: the interval becomes
//! `[0, 0]`, the uplift and point estimate are dropped, `axis_only` is set and
//! `significant` is cleared. The encoding is still reported so a caller can
//! tell which renderer branch would have applied.

use serde::{Serialize, Serializer};

use crate::diagnostics;
use crate::domain::{
    AxisDomain, ConfidenceInterval, ConfidenceThresholds, MetricDefinition, SnapshotStat,
};
use crate::encoding::{self, EncodingKind, UpliftMark};
use crate::quality::{self, DataQualityOracle};
use crate::significance::{self, SignificanceTail};

/// Fixed graph height so rows line up across a results table.
pub const GRAPH_HEIGHT: u32 = 75;

/// Fill style of the drawn mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStyle {
    Gradient,
}

/// Everything the renderer needs for one cell. Rebuilt on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationParams {
    /// `None` when a visible variant has no interval; serialized as `[]`.
    #[serde(serialize_with = "serialize_interval")]
    pub ci: Option<ConfidenceInterval>,
    pub id: String,
    pub domain: AxisDomain,
    pub uplift: Option<UpliftMark>,
    pub expected: Option<f64>,
    pub bar_type: EncodingKind,
    pub bar_fill_type: FillStyle,
    pub axis_only: bool,
    pub show_axis: bool,
    pub significant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significance_tail: Option<SignificanceTail>,
    pub height: u32,
    pub inverse: bool,
}

impl PresentationParams {
    pub fn is_visible(&self) -> bool {
        !self.axis_only
    }
}

fn serialize_interval<S: Serializer>(
    ci: &Option<ConfidenceInterval>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ci {
        Some(ci) => ci.serialize(serializer),
        None => serializer.collect_seq(std::iter::empty::<f64>()),
    }
}

/// Assemble the parameters for one metric row. Never fails.
pub fn assemble(
    oracle: &dyn DataQualityOracle,
    metric: Option<&MetricDefinition>,
    baseline: &SnapshotStat,
    variant: &SnapshotStat,
    domain: AxisDomain,
    id: &str,
    thresholds: &ConfidenceThresholds,
) -> PresentationParams {
    let visibility = quality::assess(oracle, baseline, variant, metric);
    let visible = visibility.is_visible();
    let bar_type = encoding::select(variant);
    let significance_tail = significance::classify_tail(variant, thresholds, visible);

    let (ci, uplift, expected) = if visible {
        (variant.ci, UpliftMark::from_variant(variant), variant.expected)
    } else {
        diagnostics::trace_suppressed(id, oracle.name(), visibility);
        (Some(ConfidenceInterval::ZERO), None, None)
    };

    PresentationParams {
        ci,
        id: id.to_string(),
        domain,
        uplift,
        expected,
        bar_type,
        bar_fill_type: FillStyle::Gradient,
        axis_only: !visible,
        show_axis: false,
        significant: significance_tail.is_some(),
        significance_tail,
        height: GRAPH_HEIGHT,
        inverse: metric.is_some_and(|m| m.inverse),
    }
}

/// Holds the injected quality checks so callers only pass per-row data.
#[derive(Debug, Clone, Default)]
pub struct PresentationAssembler<Q> {
    oracle: Q,
}

impl<Q: DataQualityOracle> PresentationAssembler<Q> {
    pub fn new(oracle: Q) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &Q {
        &self.oracle
    }

    pub fn assemble(
        &self,
        metric: Option<&MetricDefinition>,
        baseline: &SnapshotStat,
        variant: &SnapshotStat,
        domain: AxisDomain,
        id: &str,
        thresholds: &ConfidenceThresholds,
    ) -> PresentationParams {
        assemble(&self.oracle, metric, baseline, variant, domain, id, thresholds)
    }
}
