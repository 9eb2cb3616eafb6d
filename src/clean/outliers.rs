use crate::math::stats::quantile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

pub fn iqr_bounds(values: &[f64], threshold: f64) -> Option<IqrBounds> {
    let mut scratch = values.to_vec();
    let q1 = quantile(&mut scratch, 0.25)?;
    let q3 = quantile(&mut scratch, 0.75)?;
    let iqr = q3 - q1;
    Some(IqrBounds {
        q1,
        q3,
        lower: q1 - threshold * iqr,
        upper: q3 + threshold * iqr,
    })
}

/// Clamps values outside the bounds onto the nearest bound. Row count is
/// preserved. Returns the number of clamped values.
pub fn clip_outliers(values: &mut [f64], bounds: &IqrBounds) -> usize {
    let mut clipped = 0usize;
    for v in values.iter_mut() {
        if *v < bounds.lower {
            *v = bounds.lower;
            clipped += 1;
        } else if *v > bounds.upper {
            *v = bounds.upper;
            clipped += 1;
        }
    }
    clipped
}
