use crate::numeric::{safe_div, sanitize};

/// Trailing mean over at most `window` values. Positions whose window holds
/// fewer than `min_periods` present values are `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let present: Vec<f64> = values[start..=i].iter().filter_map(|v| *v).collect();
        if present.is_empty() || present.len() < min_periods {
            out.push(None);
        } else {
            out.push(sanitize(present.iter().sum::<f64>() / present.len() as f64));
        }
    }
    out
}

/// Relative change of each point against its immediate predecessor.
pub fn pct_change(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let change = match (values[i - 1], values[i]) {
            (Some(prev), Some(cur)) => safe_div(cur - prev, prev),
            _ => None,
        };
        out.push(change);
    }
    out
}
