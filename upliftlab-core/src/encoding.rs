//! Encoding selection: violin (full distribution) vs. pill (point estimate).
//!
//! The choice depends only on the shape of the variant's data, never on
//! visibility or significance.

use serde::{Deserialize, Serialize};

use crate::domain::{SnapshotStat, UpliftDistribution};

/// Which shape the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingKind {
    /// Smoothed density of the uplift distribution.
    #[serde(rename = "violin")]
    Distribution,
    /// Single marker with whiskers.
    #[serde(rename = "pill")]
    PointEstimate,
}

/// Select the encoding for a variant.
pub fn select(variant: &SnapshotStat) -> EncodingKind {
    if variant.distribution().is_some() {
        EncodingKind::Distribution
    } else {
        EncodingKind::PointEstimate
    }
}

/// The uplift data handed to the renderer, tagged by encoding.
///
/// Built from the same presence test as [`select`], so a `Distribution`
/// mark never exists without its descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpliftMark {
    Distribution(UpliftDistribution),
    PointEstimate { expected: f64 },
}

impl UpliftMark {
    /// `None` for a point-estimate variant that has no estimate.
    pub fn from_variant(variant: &SnapshotStat) -> Option<Self> {
        match variant.distribution() {
            Some(dist) => Some(UpliftMark::Distribution(dist.clone())),
            None => variant
                .expected
                .map(|expected| UpliftMark::PointEstimate { expected }),
        }
    }

    pub fn encoding(&self) -> EncodingKind {
        match self {
            UpliftMark::Distribution(_) => EncodingKind::Distribution,
            UpliftMark::PointEstimate { .. } => EncodingKind::PointEstimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_selects_violin() {
        let variant =
            SnapshotStat::new().with_uplift(UpliftDistribution::new("lognormal", 0.1, 0.05));
        assert_eq!(select(&variant), EncodingKind::Distribution);
    }

    #[test]
    fn missing_or_empty_descriptor_selects_pill() {
        assert_eq!(select(&SnapshotStat::new()), EncodingKind::PointEstimate);
        let empty = SnapshotStat::new().with_uplift(UpliftDistribution::default());
        assert_eq!(select(&empty), EncodingKind::PointEstimate);
    }

    #[test]
    fn whitespace_descriptor_selects_violin() {
        let variant = SnapshotStat::new().with_uplift(UpliftDistribution::new(" ", 0.0, 0.0));
        assert_eq!(select(&variant), EncodingKind::Distribution);
    }

    #[test]
    fn serializes_renderer_names() {
        assert_eq!(serde_json::to_string(&EncodingKind::Distribution).unwrap(), r#""violin""#);
        assert_eq!(serde_json::to_string(&EncodingKind::PointEstimate).unwrap(), r#""pill""#);
    }

    #[test]
    fn mark_agrees_with_selected_encoding() {
        let with_dist = SnapshotStat::new()
            .with_expected(0.04)
            .with_uplift(UpliftDistribution::new("normal", 0.04, 0.02));
        let point_only = SnapshotStat::new().with_expected(0.04);

        for variant in [with_dist, point_only] {
            let mark = UpliftMark::from_variant(&variant).unwrap();
            assert_eq!(mark.encoding(), select(&variant));
        }
    }

    #[test]
    fn point_estimate_without_expected_has_no_mark() {
        assert_eq!(UpliftMark::from_variant(&SnapshotStat::new()), None);
    }
}
