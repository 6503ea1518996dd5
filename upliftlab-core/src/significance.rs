//! Two-tailed significance test on chance-to-win.
//!
//! A visible result is significant when its win probability lies strictly
//! above `ci_upper` or strictly below `ci_lower`. Suppressed results are
//! never significant. A missing or NaN chance-to-win fails both
//! comparisons and reads as not significant.

use serde::{Deserialize, Serialize};

use crate::domain::{ConfidenceThresholds, SnapshotStat};

/// Which tail of the win probability made a result significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTail {
    /// `chance_to_win > ci_upper`: the variant is very likely better.
    Upper,
    /// `chance_to_win < ci_lower`: the variant is very likely worse.
    Lower,
}

/// Significance tail, if any. Upper is checked first.
pub fn classify_tail(
    variant: &SnapshotStat,
    thresholds: &ConfidenceThresholds,
    visible: bool,
) -> Option<SignificanceTail> {
    if !visible {
        return None;
    }
    let chance_to_win = variant.chance_to_win?;
    if chance_to_win > thresholds.ci_upper {
        Some(SignificanceTail::Upper)
    } else if chance_to_win < thresholds.ci_lower {
        Some(SignificanceTail::Lower)
    } else {
        None
    }
}

pub fn classify(variant: &SnapshotStat, thresholds: &ConfidenceThresholds, visible: bool) -> bool {
    classify_tail(variant, thresholds, visible).is_some()
}
