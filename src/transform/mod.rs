use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::batch::process_keyed;
use crate::config::TransformConfig;
use crate::error::PipelineError;
use crate::math::regression::LinearFit;
use crate::math::rolling::{pct_change, rolling_mean};
use crate::numeric::{safe_div, sanitize, sanitize_opt};
use crate::series::{FeatureColumns, Point, Series, SeriesMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    Unknown,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Increasing
        } else {
            Self::Decreasing
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationMetrics {
    pub trend_direction: TrendDirection,
    pub growth_rate: Option<f64>,
    /// Latest moving-average value per window, keyed `"7d"`, `"30d"`, ...
    pub moving_average: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformedSeries {
    pub series: Series,
    pub features: FeatureColumns,
}

#[derive(Debug)]
pub struct TransformOutcome {
    pub series: BTreeMap<String, TransformedSeries>,
    pub metrics: BTreeMap<String, TransformationMetrics>,
    pub warnings: Vec<String>,
}

pub fn transform_series(
    series: &Series,
    config: &TransformConfig,
) -> std::result::Result<(TransformedSeries, TransformationMetrics), PipelineError> {
    let points: Vec<Point> = series
        .points
        .iter()
        .filter_map(|p| {
            sanitize_opt(p.value).map(|v| Point {
                ts: p.ts,
                value: Some(v),
            })
        })
        .collect();
    if points.is_empty() {
        return Err(PipelineError::NoValidData {
            stage: "numeric sanitization",
        });
    }
    let clean = Series {
        key: series.key.clone(),
        category: series.category.clone(),
        points,
    };
    let values = clean.values();

    let moving_averages = config
        .ma_windows
        .iter()
        .map(|&w| (w, rolling_mean(&values, w, config.min_periods)))
        .collect();
    let features = FeatureColumns {
        moving_averages,
        pct_change: pct_change(&values),
    };

    let metrics = trend_metrics(&clean.present_values(), &features, config);
    Ok((
        TransformedSeries {
            series: clean,
            features,
        },
        metrics,
    ))
}

fn trend_metrics(
    values: &[f64],
    features: &FeatureColumns,
    config: &TransformConfig,
) -> TransformationMetrics {
    let growth_rate = match (values.first(), values.last()) {
        (Some(&first), Some(&last)) => safe_div(last - first, first),
        _ => None,
    };

    let moving_average = features
        .moving_averages
        .iter()
        .map(|(w, col)| (format!("{}d", w), col.last().copied().flatten()))
        .collect();

    let slope = LinearFit::fit(values).ok().and_then(|fit| sanitize(fit.slope));
    let trend_direction = match slope {
        None => TrendDirection::Unknown,
        Some(_) if growth_rate.unwrap_or(0.0).abs() < config.growth_threshold => {
            TrendDirection::Stable
        }
        Some(s) => TrendDirection::from_slope(s),
    };

    TransformationMetrics {
        trend_direction,
        growth_rate,
        moving_average,
    }
}

pub fn transform_all(
    series: SeriesMap,
    config: &TransformConfig,
    threads: usize,
) -> Result<TransformOutcome> {
    let outcome = process_keyed("transformation", series, threads, |key, s: Series| {
        info!(key, "transforming series");
        transform_series(&s, config)
    })?;
    let warnings = outcome.warnings("transformation");

    let mut transformed = BTreeMap::new();
    let mut metrics = BTreeMap::new();
    for (key, (t, m)) in outcome.ok {
        transformed.insert(key.clone(), t);
        metrics.insert(key, m);
    }
    Ok(TransformOutcome {
        series: transformed,
        metrics,
        warnings,
    })
}
