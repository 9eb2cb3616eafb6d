use crate::analysis::BasicStats;
use crate::math::stats;
use crate::numeric::sanitize;

/// Each statistic is sanitized on its own; one null does not void the others.
pub fn compute_basic_stats(values: &[f64]) -> BasicStats {
    let mut scratch = values.to_vec();
    BasicStats {
        mean: stats::mean(values).and_then(sanitize),
        median: stats::median(&mut scratch).and_then(sanitize),
        std: stats::std_pop(values).and_then(sanitize),
        min: stats::min(values).and_then(sanitize),
        max: stats::max(values).and_then(sanitize),
        last_value: values.last().copied().and_then(sanitize),
    }
}
