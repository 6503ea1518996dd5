use serde::{Deserialize, Serialize};

/// A metric as defined by the experiment owner.
///
/// `inverse` is true when lower values are better (e.g. bounce rate,
/// page load time). It flips the direction the renderer treats as an
/// improvement; it never changes visibility or significance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinition {
    pub id: String,
    #[serde(default)]
    pub inverse: bool,
    /// Per-metric override of the minimum sample size. Zero or negative
    /// falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sample_size: Option<f64>,
    /// Per-metric override of the relative change considered implausible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_percent_change: Option<f64>,
}

impl MetricDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    pub fn with_min_sample_size(mut self, min_sample_size: f64) -> Self {
        self.min_sample_size = Some(min_sample_size);
        self
    }

    pub fn with_max_percent_change(mut self, max_percent_change: f64) -> Self {
        self.max_percent_change = Some(max_percent_change);
        self
    }

    /// The metric's own minimum sample size, if it sets a usable one.
    pub fn min_sample_size_override(&self) -> Option<f64> {
        positive(self.min_sample_size)
    }

    /// The metric's own suspicious-change cutoff, if it sets a usable one.
    pub fn max_percent_change_override(&self) -> Option<f64> {
        positive(self.max_percent_change)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    super::finite(value).filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let metric: MetricDefinition = serde_json::from_str(r#"{"id":"met_1"}"#).unwrap();
        assert_eq!(metric.id, "met_1");
        assert!(!metric.inverse);
        assert!(metric.min_sample_size.is_none());
    }

    #[test]
    fn reads_camel_case_overrides() {
        let metric: MetricDefinition = serde_json::from_str(
            r#"{"id":"met_2","inverse":true,"minSampleSize":500,"maxPercentChange":0.3}"#,
        )
        .unwrap();
        assert!(metric.inverse);
        assert_eq!(metric.min_sample_size_override(), Some(500.0));
        assert_eq!(metric.max_percent_change_override(), Some(0.3));
    }

    #[test]
    fn non_positive_overrides_are_ignored() {
        let metric = MetricDefinition::new("m")
            .with_min_sample_size(0.0)
            .with_max_percent_change(-1.0);
        assert_eq!(metric.min_sample_size_override(), None);
        assert_eq!(metric.max_percent_change_override(), None);

        let nan = MetricDefinition::new("m").with_min_sample_size(f64::NAN);
        assert_eq!(nan.min_sample_size_override(), None);
    }
}
