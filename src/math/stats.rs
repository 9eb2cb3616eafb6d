//! Descriptive statistics over finite samples.
//!
//! Note: `median` and `quantile` reorder the input slice.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        Some(values[n / 2])
    } else {
        let a = values[n / 2 - 1];
        let b = values[n / 2];
        Some((a + b) / 2.0)
    }
}

/// Power of two at or below the largest magnitude, or `1.0` when every value
/// fits in `[-1, 1]`. Dividing by it is exact and keeps squared sums in range.
pub fn pow2_scale(values: &[f64]) -> f64 {
    let max_abs = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if max_abs > 1.0 && max_abs.is_finite() {
        2f64.powi(max_abs.log2().floor() as i32)
    } else {
        1.0
    }
}

/// Population standard deviation (divisor `n`).
pub fn std_pop(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let deviations: Vec<f64> = values.iter().map(|v| v - m).collect();
    root_mean_square(&deviations)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Quantile with linear interpolation between closest ranks, `q` in `[0, 1]`.
pub fn quantile(values: &mut [f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let pos = (values.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(values[lo] + (values[hi] - values[lo]) * frac)
}

pub fn mean_abs(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64)
}

pub fn root_mean_square(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = pow2_scale(values);
    let mean_sq = values.iter().map(|v| (v / scale).powi(2)).sum::<f64>() / values.len() as f64;
    Some(mean_sq.sqrt() * scale)
}
