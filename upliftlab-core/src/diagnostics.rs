//! Opt-in decision tracing on stderr.
//!
//! # Environment Variables
//!
//! - `UPLIFTLAB_TRACE=1` - Log suppressed rows and per-column summaries
//!
//! Tracing is observational only; it never changes assembled output and
//! keeps no state beyond the on/off flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::quality::Visibility;

static TRACE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Read `UPLIFTLAB_TRACE` and configure tracing.
///
/// Should be called once at program startup.
pub fn init() {
    let enabled = std::env::var("UPLIFTLAB_TRACE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    set_enabled(enabled);

    if enabled {
        eprintln!("[TRACE] Enabled (UPLIFTLAB_TRACE=1)");
    }
}

pub fn set_enabled(enabled: bool) {
    TRACE_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled() -> bool {
    TRACE_ENABLED.load(Ordering::Relaxed)
}

fn suppressed_line(id: &str, oracle: &str, reason: Visibility) -> String {
    format!("[TRACE] {id}: suppressed by {oracle} ({})", reason.label())
}

/// Log a suppressed row, naming the oracle and the check that failed.
pub fn trace_suppressed(id: &str, oracle: &str, reason: Visibility) {
    if is_enabled() {
        eprintln!("{}", suppressed_line(id, oracle, reason));
    }
}

/// Summary line for one assembled column.
pub fn trace_column(
    id_prefix: &str,
    rows: usize,
    visible: usize,
    significant: usize,
    elapsed: Duration,
) {
    if is_enabled() {
        eprintln!(
            "[TRACE] column {id_prefix}: {rows} rows, {visible} visible, \
             {significant} significant in {:.3}ms",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppressed_line_names_oracle_and_reason() {
        assert_eq!(
            suppressed_line("exp_v1_conv", "sample_size", Visibility::SuspiciousUplift),
            "[TRACE] exp_v1_conv: suppressed by sample_size (suspicious uplift)"
        );
    }

    #[test]
    fn column_summary_does_not_panic_when_enabled() {
        let was = is_enabled();
        set_enabled(true);
        trace_column("exp_1", 3, 2, 1, Duration::from_micros(40));
        trace_suppressed("exp_1_conv", "sample_size", Visibility::NotEnoughData);
        set_enabled(was);
    }
}
