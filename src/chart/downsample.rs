use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::numeric::sanitize_opt;
use crate::series::Point;

/// Sanitized `(ts, value)` pairs, collapsed to one mean per calendar day when
/// the series holds more than `max_points` points. Days without a valid value
/// are dropped.
pub fn prepare_time_series(points: &[Point], max_points: usize) -> Vec<(NaiveDateTime, f64)> {
    let valid = points
        .iter()
        .filter_map(|p| sanitize_opt(p.value).map(|v| (p.ts, v)));
    if points.len() <= max_points {
        return valid.collect();
    }

    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for (ts, v) in valid {
        let slot = days.entry(ts.date()).or_insert((0.0, 0));
        slot.0 += v;
        slot.1 += 1;
    }
    days.into_iter()
        .filter_map(|(day, (sum, n))| {
            let mean = sanitize_opt(Some(sum / n as f64))?;
            Some((day.and_hms_opt(0, 0, 0)?, mean))
        })
        .collect()
}
