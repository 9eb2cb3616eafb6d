pub fn forward_fill(values: &mut [Option<f64>]) {
    let mut last = None;
    for v in values.iter_mut() {
        match v {
            Some(x) => last = Some(*x),
            None => *v = last,
        }
    }
}

pub fn backward_fill(values: &mut [Option<f64>]) {
    let mut next = None;
    for v in values.iter_mut().rev() {
        match v {
            Some(x) => next = Some(*x),
            None => *v = next,
        }
    }
}

/// Fills gaps bounded on both sides by present values, linear in position.
/// Leading and trailing gaps are left untouched.
pub fn interpolate_linear(values: &mut [Option<f64>]) {
    let mut prev: Option<(usize, f64)> = None;
    for i in 0..values.len() {
        let Some(x) = values[i] else {
            continue;
        };
        if let Some((p, px)) = prev {
            let span = (i - p) as f64;
            for j in (p + 1)..i {
                let frac = (j - p) as f64 / span;
                values[j] = Some(px + (x - px) * frac);
            }
        }
        prev = Some((i, x));
    }
}

/// Forward fill, then interior interpolation, then backward fill for any
/// leading gap.
pub fn impute(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = values.to_vec();
    forward_fill(&mut out);
    interpolate_linear(&mut out);
    backward_fill(&mut out);
    out
}
