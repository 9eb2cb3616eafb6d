use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::analysis::{AnalysisResult, Forecast, TrendAnalysis};
use crate::config::ChartConfig;
use crate::error::PipelineError;
use crate::numeric::{sanitize, sanitize_opt};
use crate::series::{Series, category_label, format_ts};

pub mod downsample;

pub const STRENGTH_CHART_KEY: &str = "category_strength";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Band { x: String, y0: f64, y1: f64 },
    Xy { x: String, y: f64 },
    Bar(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<ChartPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "yAxisID", default, skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
}

impl Dataset {
    fn line(label: &str, data: Vec<ChartPoint>, color: &str) -> Self {
        Self {
            label: label.to_string(),
            data,
            border_color: Some(color.to_string()),
            background_color: "transparent".to_string(),
            border_dash: None,
            border_width: None,
            kind: Some("line".to_string()),
            y_axis_id: None,
        }
    }

    fn bar(label: &str, data: Vec<f64>, color: &str) -> Self {
        Self {
            label: label.to_string(),
            data: data.into_iter().map(ChartPoint::Bar).collect(),
            border_color: None,
            background_color: color.to_string(),
            border_dash: None,
            border_width: None,
            kind: None,
            y_axis_id: Some("y".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: Value,
}

pub type Visualizations = BTreeMap<String, ChartSpec>;

/// Line chart of the observed series with trend and optional forecast
/// overlays. Trend values align positionally with the series points.
pub fn trend_chart(
    series: &Series,
    trend: &TrendAnalysis,
    forecast: Option<&Forecast>,
    config: &ChartConfig,
) -> Result<ChartSpec, PipelineError> {
    if series.is_empty() {
        return Err(PipelineError::NoValidData { stage: "trend chart" });
    }
    let daily = downsample::prepare_time_series(&series.points, config.max_points);
    let actual: Vec<ChartPoint> = daily
        .into_iter()
        .map(|(ts, y)| ChartPoint::Xy { x: format_ts(&ts), y })
        .collect();
    if actual.is_empty() {
        return Err(PipelineError::NoValidData { stage: "trend chart" });
    }

    let colors = &config.colors;
    let mut datasets = vec![Dataset::line("Actual Values", actual, &colors.actual)];

    let trend_points: Vec<ChartPoint> = series
        .points
        .iter()
        .zip(&trend.trend_values)
        .filter_map(|(p, v)| {
            sanitize_opt(*v).map(|y| ChartPoint::Xy {
                x: format_ts(&p.ts),
                y,
            })
        })
        .collect();
    if !trend_points.is_empty() {
        let mut ds = Dataset::line("Trend", trend_points, &colors.trend);
        ds.border_dash = Some(vec![5, 5]);
        datasets.push(ds);
    }

    if let (Some(forecast), Some(last)) = (forecast, series.last_ts()) {
        datasets.extend(forecast_datasets(last, forecast, config));
    }

    Ok(ChartSpec {
        kind: "line".to_string(),
        data: ChartData {
            labels: None,
            datasets,
        },
        options: json!({
            "responsive": true,
            "scales": {
                "x": {
                    "type": "time",
                    "time": {"unit": "day"},
                    "title": {"display": true, "text": "Date"}
                },
                "y": {
                    "title": {"display": true, "text": "Value"}
                }
            }
        }),
    })
}

fn forecast_datasets(
    last: NaiveDateTime,
    forecast: &Forecast,
    config: &ChartConfig,
) -> Vec<Dataset> {
    let dates: Vec<String> = (1..=forecast.predictions.len())
        .map(|d| format_ts(&(last + Duration::days(d as i64))))
        .collect();

    let predicted: Vec<ChartPoint> = dates
        .iter()
        .zip(&forecast.predictions)
        .filter_map(|(x, v)| sanitize_opt(*v).map(|y| ChartPoint::Xy { x: x.clone(), y }))
        .collect();
    let bands: Vec<ChartPoint> = dates
        .iter()
        .zip(forecast.lower_bound.iter().zip(&forecast.upper_bound))
        .filter_map(|(x, (lo, hi))| {
            Some(ChartPoint::Band {
                x: x.clone(),
                y0: sanitize_opt(*lo)?,
                y1: sanitize_opt(*hi)?,
            })
        })
        .collect();

    let mut out = Vec::new();
    if !predicted.is_empty() {
        out.push(Dataset::line("Forecast", predicted, &config.colors.forecast));
    }
    if !bands.is_empty() {
        out.push(Dataset {
            label: "Forecast Range".to_string(),
            data: bands,
            border_color: None,
            background_color: config.colors.bounds.clone(),
            border_dash: None,
            border_width: Some(0),
            kind: Some("area".to_string()),
            y_axis_id: None,
        });
    }
    out
}

/// Bar chart comparing total growth against trend strength across series,
/// both as percentages, ordered by growth descending.
pub fn category_strength_chart(
    results: &BTreeMap<String, AnalysisResult>,
    config: &ChartConfig,
) -> Result<ChartSpec, PipelineError> {
    let mut rows: Vec<(String, f64, f64)> = results
        .iter()
        .filter_map(|(key, r)| {
            let growth = sanitize(r.growth_metrics.total_growth? * 100.0)?;
            let strength = sanitize(r.trend_analysis.strength? * 100.0)?;
            Some((category_label(key).to_string(), growth, strength))
        })
        .collect();
    if rows.is_empty() {
        return Err(PipelineError::NoValidData {
            stage: "category strength chart",
        });
    }
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let labels = rows.iter().map(|r| r.0.clone()).collect();
    let growth = rows.iter().map(|r| r.1).collect();
    let strength = rows.iter().map(|r| r.2).collect();
    Ok(ChartSpec {
        kind: "bar".to_string(),
        data: ChartData {
            labels: Some(labels),
            datasets: vec![
                Dataset::bar("Growth Rate (%)", growth, &config.colors.actual),
                Dataset::bar("Trend Strength (%)", strength, &config.colors.trend),
            ],
        },
        options: json!({
            "responsive": true,
            "scales": {
                "y": {
                    "title": {"display": true, "text": "Percentage (%)"}
                }
            }
        }),
    })
}

/// Every chart that can be built. A chart that fails is skipped with a
/// warning; the rest are still returned.
pub fn build_visualizations(
    series: &BTreeMap<String, Series>,
    results: &BTreeMap<String, AnalysisResult>,
    config: &ChartConfig,
) -> (Visualizations, Vec<String>) {
    let mut charts = Visualizations::new();
    let mut warnings = Vec::new();

    for (key, result) in results {
        let Some(s) = series.get(key) else {
            continue;
        };
        match trend_chart(s, &result.trend_analysis, result.forecast.as_ref(), config) {
            Ok(chart) => {
                charts.insert(format!("{key}_trend"), chart);
            }
            Err(e) => {
                warn!(key, error = %e, "chart_skipped");
                warnings.push(format!("{key}: trend chart skipped: {e}"));
            }
        }
    }

    if !results.is_empty() {
        match category_strength_chart(results, config) {
            Ok(chart) => {
                charts.insert(STRENGTH_CHART_KEY.to_string(), chart);
            }
            Err(e) => {
                warn!(error = %e, "chart_skipped");
                warnings.push(format!("{STRENGTH_CHART_KEY}: skipped: {e}"));
            }
        }
    }
    (charts, warnings)
}
