//! UpliftLab Core: presentation rules for one metric's experiment result.
//!
//! Given a baseline and a variant summary for a metric, this crate decides:
//! - whether the result is trustworthy enough to draw (visibility policy)
//! - whether to draw a full distribution or a point estimate (encoding)
//! - whether to flag it as significant (two-tailed chance-to-win test)
//!
//! and bundles the decisions into [`PresentationParams`] for an external
//! renderer. It computes no statistics and draws nothing.

pub mod column;
pub mod diagnostics;
pub mod domain;
pub mod encoding;
pub mod presentation;
pub mod quality;
pub mod settings;
pub mod significance;

pub use column::{ColumnAssembler, ColumnInput, InputError, MetricRow};
pub use domain::{
    AxisDomain, ConfidenceInterval, ConfidenceThresholds, MetricDefinition, SnapshotStat,
    UpliftDistribution,
};
pub use encoding::{EncodingKind, UpliftMark};
pub use presentation::{
    assemble, FillStyle, PresentationAssembler, PresentationParams, GRAPH_HEIGHT,
};
pub use quality::{
    DataQualityOracle, QualityDefaults, QualityVerdict, SampleSizeOracle, Visibility,
};
pub use settings::{Settings, SettingsError};
pub use significance::SignificanceTail;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn input_types_are_send_sync() {
        assert_send::<MetricDefinition>();
        assert_sync::<MetricDefinition>();
        assert_send::<SnapshotStat>();
        assert_sync::<SnapshotStat>();
        assert_send::<MetricRow>();
        assert_sync::<MetricRow>();
    }

    #[test]
    fn presentation_params_is_send_sync() {
        assert_send::<PresentationParams>();
        assert_sync::<PresentationParams>();
    }

    #[test]
    fn assemblers_are_send_sync() {
        assert_send::<PresentationAssembler<SampleSizeOracle>>();
        assert_sync::<PresentationAssembler<SampleSizeOracle>>();
        assert_send::<ColumnAssembler<SampleSizeOracle>>();
        assert_sync::<ColumnAssembler<SampleSizeOracle>>();
    }

    #[test]
    fn oracle_trait_object_is_send_sync() {
        assert_send::<Box<dyn DataQualityOracle>>();
        assert_sync::<Box<dyn DataQualityOracle>>();
    }
}
