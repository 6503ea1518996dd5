//! Results column: one graph per metric for a single variant.
//!
//! Rows are independent, so a column can be assembled on the rayon pool or
//! sequentially; both paths produce the same output in row order.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics;
use crate::domain::{AxisDomain, ConfidenceThresholds, MetricDefinition, SnapshotStat};
use crate::presentation::{PresentationAssembler, PresentationParams};
use crate::quality::{self, DataQualityOracle};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("read column input {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse column input JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One metric's baseline and variant summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricRow {
    #[serde(default)]
    pub metric: Option<MetricDefinition>,
    #[serde(default)]
    pub baseline: SnapshotStat,
    #[serde(default)]
    pub variant: SnapshotStat,
}

impl MetricRow {
    pub fn new(metric: MetricDefinition, baseline: SnapshotStat, variant: SnapshotStat) -> Self {
        Self {
            metric: Some(metric),
            baseline,
            variant,
        }
    }

    /// `{prefix}_{metric id}`, or `{prefix}_{index}` without a metric.
    pub fn graph_id(&self, prefix: &str, index: usize) -> String {
        match &self.metric {
            Some(metric) => format!("{prefix}_{}", metric.id),
            None => format!("{prefix}_{index}"),
        }
    }
}

/// JSON document describing a column to assemble.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnInput {
    pub id: String,
    /// Caller-supplied scale; derived from the rows when absent.
    #[serde(default)]
    pub domain: Option<AxisDomain>,
    pub rows: Vec<MetricRow>,
}

impl ColumnInput {
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn resolve_domain(&self, oracle: &dyn DataQualityOracle) -> AxisDomain {
        self.domain
            .unwrap_or_else(|| AxisDomain::spanning(&self.rows, oracle))
    }
}

impl AxisDomain {
    /// Domain covering every drawable interval in `rows`, always including zero.
    ///
    /// Suppressed rows and rows without a finite interval are ignored; if
    /// nothing remains the domain is [`AxisDomain::FALLBACK`].
    pub fn spanning(rows: &[MetricRow], oracle: &dyn DataQualityOracle) -> Self {
        rows.iter()
            .filter(|row| quality::decide(oracle, &row.baseline, &row.variant, row.metric.as_ref()))
            .filter_map(|row| row.variant.ci)
            .filter(|ci| ci.is_finite())
            .fold(None, |domain: Option<AxisDomain>, ci| {
                Some(domain.unwrap_or(AxisDomain::new(0.0, 0.0)).widened_to(&ci))
            })
            .unwrap_or(AxisDomain::FALLBACK)
    }
}

/// Assembles every row of a column against one domain and threshold pair.
pub struct ColumnAssembler<Q> {
    assembler: PresentationAssembler<Q>,
    parallel: bool,
}

impl<Q: DataQualityOracle> ColumnAssembler<Q> {
    pub fn new(oracle: Q) -> Self {
        Self {
            assembler: PresentationAssembler::new(oracle),
            parallel: true,
        }
    }

    /// Enables or disables parallel assembly.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn oracle(&self) -> &Q {
        self.assembler.oracle()
    }

    pub fn assemble(
        &self,
        rows: &[MetricRow],
        domain: AxisDomain,
        id_prefix: &str,
        thresholds: &ConfidenceThresholds,
    ) -> Vec<PresentationParams> {
        let start = Instant::now();
        let build = |(index, row): (usize, &MetricRow)| {
            self.assembler.assemble(
                row.metric.as_ref(),
                &row.baseline,
                &row.variant,
                domain,
                &row.graph_id(id_prefix, index),
                thresholds,
            )
        };

        let params: Vec<PresentationParams> = if self.parallel {
            rows.par_iter().enumerate().map(build).collect()
        } else {
            rows.iter().enumerate().map(build).collect()
        };

        let visible = params.iter().filter(|p| p.is_visible()).count();
        let significant = params.iter().filter(|p| p.significant).count();
        diagnostics::trace_column(id_prefix, params.len(), visible, significant, start.elapsed());

        params
    }

    /// Assemble a parsed input document, deriving the domain if needed.
    pub fn assemble_input(
        &self,
        input: &ColumnInput,
        thresholds: &ConfidenceThresholds,
    ) -> Vec<PresentationParams> {
        let domain = input.resolve_domain(self.oracle());
        self.assemble(&input.rows, domain, &input.id, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::SampleSizeOracle;

    fn trusted_row(id: &str, lower: f64, upper: f64) -> MetricRow {
        MetricRow::new(
            MetricDefinition::new(id),
            SnapshotStat::new().with_value(500.0).with_cr(0.10),
            SnapshotStat::new()
                .with_value(520.0)
                .with_cr(0.104)
                .with_ci(lower, upper),
        )
    }

    #[test]
    fn spanning_includes_zero_and_all_visible_intervals() {
        let rows = vec![trusted_row("a", 0.02, 0.08), trusted_row("b", 0.01, 0.15)];
        let domain = AxisDomain::spanning(&rows, &SampleSizeOracle::default());
        assert_eq!(domain, AxisDomain::new(0.0, 0.15));
    }

    #[test]
    fn spanning_ignores_suppressed_rows() {
        let mut small = trusted_row("small", -0.9, 0.9);
        small.baseline.value = Some(10.0);
        small.variant.value = Some(12.0);
        let rows = vec![small, trusted_row("a", -0.05, 0.03)];
        let domain = AxisDomain::spanning(&rows, &SampleSizeOracle::default());
        assert_eq!(domain, AxisDomain::new(-0.05, 0.03));
    }

    #[test]
    fn spanning_falls_back_without_intervals() {
        let domain = AxisDomain::spanning(&[], &SampleSizeOracle::default());
        assert_eq!(domain, AxisDomain::FALLBACK);
    }

    #[test]
    fn graph_ids_use_metric_or_index() {
        let row = trusted_row("conv", 0.0, 0.1);
        assert_eq!(row.graph_id("exp_v1", 3), "exp_v1_conv");
        assert_eq!(MetricRow::default().graph_id("exp_v1", 3), "exp_v1_3");
    }

    #[test]
    fn input_document_parses() {
        let input = ColumnInput::from_json(
            r#"{
                "id": "exp_v1",
                "rows": [{
                    "metric": {"id": "conv"},
                    "baseline": {"value": 300},
                    "variant": {"value": 310, "ci": [-0.1, 0.2]}
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(input.rows.len(), 1);
        assert!(input.domain.is_none());
        assert_eq!(input.resolve_domain(&SampleSizeOracle::default()), AxisDomain::new(-0.1, 0.2));
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let err = ColumnInput::from_json("{\"id\": ").unwrap_err();
        assert!(matches!(err, InputError::Parse(_)));
    }
}
