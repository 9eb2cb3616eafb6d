use std::collections::BTreeMap;

use chrono::NaiveDateTime;

pub const KEY_PREFIX: &str = "category_";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub ts: NaiveDateTime,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: String,
    pub category: String,
    pub points: Vec<Point>,
}

pub type SeriesMap = BTreeMap<String, Series>;

impl Series {
    pub fn new(category: &str, points: Vec<Point>) -> Self {
        Self {
            key: series_key(category),
            category: category.to_string(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Values of points that carry one, in order. Only meaningful once the
    /// series has been imputed or sanitized.
    pub fn present_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.value).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.ts).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_none()).count()
    }

    pub fn last_ts(&self) -> Option<NaiveDateTime> {
        self.points.last().map(|p| p.ts)
    }

    pub fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        let points = self
            .points
            .iter()
            .zip(values)
            .map(|(p, value)| Point { ts: p.ts, value })
            .collect();
        Self {
            key: self.key.clone(),
            category: self.category.clone(),
            points,
        }
    }
}

pub fn series_key(category: &str) -> String {
    format!("{}{}", KEY_PREFIX, category)
}

pub fn category_label(key: &str) -> &str {
    key.strip_prefix(KEY_PREFIX).unwrap_or(key)
}

/// Derived columns aligned row-for-row with a transformed [`Series`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureColumns {
    pub moving_averages: Vec<(usize, Vec<Option<f64>>)>,
    pub pct_change: Vec<Option<f64>>,
}

impl FeatureColumns {
    pub fn moving_average(&self, window: usize) -> Option<&[Option<f64>]> {
        self.moving_averages
            .iter()
            .find(|(w, _)| *w == window)
            .map(|(_, v)| v.as_slice())
    }
}

pub fn ma_column_name(window: usize) -> String {
    format!("ma_{}d", window)
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}
