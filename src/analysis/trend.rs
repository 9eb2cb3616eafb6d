use tracing::warn;

use crate::analysis::TrendAnalysis;
use crate::math::regression::LinearFit;
use crate::math::stats::mean;
use crate::numeric::{safe_div, sanitize, sanitize_all};
use crate::transform::TrendDirection;

pub fn analyze_trend(values: &[f64], significant_change: f64) -> TrendAnalysis {
    let fit = match LinearFit::fit(values) {
        Ok(fit) => fit,
        Err(err) => {
            warn!(reason = %err, "trend regression failed");
            return TrendAnalysis {
                direction: TrendDirection::Unknown,
                slope: None,
                strength: None,
                significant: false,
                trend_values: Vec::new(),
            };
        }
    };

    let slope = sanitize(fit.slope);
    let strength = sanitize(fit.r_squared);
    let trend_values = sanitize_all(&fit.fitted());

    let relative_slope = match (slope, mean(values)) {
        (Some(s), Some(m)) => safe_div(s, m),
        _ => None,
    };

    let direction = match (relative_slope, slope) {
        (Some(r), _) if r.abs() < significant_change => TrendDirection::Stable,
        (Some(_), Some(s)) => TrendDirection::from_slope(s),
        _ => TrendDirection::Unknown,
    };
    let significant = relative_slope.is_some_and(|r| r.abs() >= significant_change);

    TrendAnalysis {
        direction,
        slope,
        strength,
        significant,
        trend_values,
    }
}
