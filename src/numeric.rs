//! Numeric safety boundary shared by every pipeline stage.
//!
//! A value either survives as a finite `f64` with magnitude at most
//! [`MAX_ABS_VALUE`], or it becomes `None`. Nothing here ever fails.

use tracing::debug;

pub const MAX_ABS_VALUE: f64 = 1e308;

pub fn sanitize(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() > MAX_ABS_VALUE {
        debug!(value, "value exceeds safe limits");
        return None;
    }
    Some(value)
}

pub fn sanitize_opt(value: Option<f64>) -> Option<f64> {
    value.and_then(sanitize)
}

/// Parses a textual cell. Empty, non-numeric and non-finite text all map to `None`.
pub fn sanitize_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(sanitize)
}

pub fn sanitize_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().and_then(sanitize),
        serde_json::Value::String(s) => sanitize_str(s),
        _ => None,
    }
}

pub fn sanitize_all(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|&v| sanitize(v)).collect()
}

pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    sanitize(numerator / denominator)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `0.8` -> `"80.00%"`; null stays null.
pub fn format_percent(value: Option<f64>) -> Option<String> {
    sanitize_opt(value).map(|v| format!("{:.2}%", v * 100.0))
}

pub fn format_decimal(value: Option<f64>) -> Option<String> {
    sanitize_opt(value).map(|v| format!("{:.2}", v))
}

/// Display form used by text exports: `N/A` for null.
pub fn display_or_na(value: Option<f64>) -> String {
    match sanitize_opt(value) {
        Some(v) => format_float(v),
        None => "N/A".to_string(),
    }
}

/// Shortest round-trip representation that always carries a decimal point
/// (`10.0`, `0.25`, `1e-7`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
