use std::collections::BTreeMap;

use crate::analysis::GrowthMetrics;
use crate::numeric::{safe_div, sanitize};

pub fn window_key(window: usize) -> String {
    format!("{}d_growth", window)
}

/// `(end - start) / start`, null when either endpoint or the division is invalid.
pub fn growth_between(start: f64, end: f64) -> Option<f64> {
    let start = sanitize(start)?;
    let end = sanitize(end)?;
    safe_div(end - start, start)
}

pub fn compute_growth(values: &[f64], windows: &[usize]) -> GrowthMetrics {
    let total_growth = match (values.first(), values.last()) {
        (Some(&first), Some(&last)) => growth_between(first, last),
        _ => None,
    };

    let n = values.len();
    let mut by_window = BTreeMap::new();
    for &window in windows {
        if window == 0 || n < window {
            continue;
        }
        let growth = growth_between(values[n - window], values[n - 1]);
        by_window.insert(window_key(window), growth);
    }

    GrowthMetrics {
        total_growth,
        windows: by_window,
    }
}
