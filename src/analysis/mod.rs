use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::batch::process_keyed;
use crate::config::AnalyticsConfig;
use crate::error::PipelineError;
use crate::numeric::sanitize_opt;
use crate::series::{Series, SeriesMap};
use crate::transform::TrendDirection;

pub mod basic;
pub mod forecast;
pub mod growth;
pub mod summary;
pub mod trend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub last_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub slope: Option<f64>,
    /// Coefficient of determination of the linear fit.
    pub strength: Option<f64>,
    pub significant: bool,
    pub trend_values: Vec<Option<f64>>,
}

/// `total_growth` plus one `<w>d_growth` entry per trailing window that fits
/// in the history. Windows longer than the series are absent, not null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub total_growth: Option<f64>,
    #[serde(flatten)]
    pub windows: BTreeMap<String, Option<f64>>,
}

impl GrowthMetrics {
    pub fn window(&self, window: usize) -> Option<Option<f64>> {
        self.windows.get(&growth::window_key(window)).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub mae: Option<f64>,
    pub rmse: Option<f64>,
    pub std_error: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predictions: Vec<Option<f64>>,
    pub lower_bound: Vec<Option<f64>>,
    pub upper_bound: Vec<Option<f64>>,
    pub metrics: ForecastMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub trend_analysis: TrendAnalysis,
    pub growth_metrics: GrowthMetrics,
    pub basic_stats: BasicStats,
    pub forecast: Option<Forecast>,
}

#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub results: BTreeMap<String, AnalysisResult>,
    pub warnings: Vec<String>,
}

pub fn analyze(
    series: &Series,
    include_forecast: bool,
    config: &AnalyticsConfig,
) -> std::result::Result<AnalysisResult, PipelineError> {
    let values: Vec<f64> = series
        .points
        .iter()
        .filter_map(|p| sanitize_opt(p.value))
        .collect();
    if values.len() < config.min_points {
        return Err(PipelineError::InsufficientData {
            required: config.min_points,
            actual: values.len(),
        });
    }

    let basic_stats = basic::compute_basic_stats(&values);
    let trend_analysis = trend::analyze_trend(&values, config.significant_change);
    let growth_metrics = growth::compute_growth(&values, &config.growth_windows);
    let forecast = if include_forecast {
        forecast::generate_forecast(&values, config.forecast_days)
    } else {
        None
    };

    Ok(AnalysisResult {
        trend_analysis,
        growth_metrics,
        basic_stats,
        forecast,
    })
}

pub fn analyze_all(
    series: &SeriesMap,
    include_forecast: bool,
    config: &AnalyticsConfig,
    threads: usize,
) -> Result<AnalyzeOutcome> {
    let borrowed: BTreeMap<String, &Series> =
        series.iter().map(|(k, s)| (k.clone(), s)).collect();
    let outcome = process_keyed("analysis", borrowed, threads, |key, s: &Series| {
        info!(key, "analyzing series");
        analyze(s, include_forecast, config)
    })?;
    let warnings = outcome.warnings("analysis");
    Ok(AnalyzeOutcome {
        results: outcome.ok,
        warnings,
    })
}
