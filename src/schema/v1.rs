use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{BasicStats, Forecast, ForecastMetrics, GrowthMetrics, TrendAnalysis};
use crate::chart::ChartSpec;
use crate::transform::TrendDirection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    pub strength: Option<f64>,
    pub significant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub total: Option<String>,
    pub recent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStats {
    pub last_value: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub available: bool,
    pub metrics: Option<ForecastMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub trend: TrendSummary,
    pub growth: GrowthSummary,
    pub current_stats: CurrentStats,
    pub forecast: ForecastSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub initial: usize,
    pub cleaned: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesHandled {
    pub missing_values: usize,
    pub duplicates: usize,
    pub outliers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub records: RecordCounts,
    pub issues_handled: IssuesHandled,
    pub quality_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformTrendSummary {
    pub direction: TrendDirection,
    pub growth_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationSummary {
    pub trend: TransformTrendSummary,
    pub moving_averages: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReportV1 {
    pub timestamp: String,
    pub analysis: BTreeMap<String, AnalysisSummary>,
    pub quality_metrics: BTreeMap<String, QualitySummary>,
    pub visualizations: BTreeMap<String, ChartSpec>,
}

impl AnalysisReportV1 {
    pub fn empty(timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            analysis: BTreeMap::new(),
            quality_metrics: BTreeMap::new(),
            visualizations: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickResult {
    pub trend: TrendDirection,
    pub growth: Option<String>,
    pub current_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReportV1 {
    pub timestamp: String,
    pub results: BTreeMap<String, QuickResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub date: String,
    pub category: String,
    pub value: Option<f64>,
    #[serde(flatten)]
    pub features: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportAnalysis {
    pub trend: TrendAnalysis,
    pub growth: GrowthMetrics,
    pub statistics: BasicStats,
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPair {
    pub data: Vec<ExportRecord>,
    pub analysis: Option<ExportAnalysis>,
    pub transformation: Option<TransformationSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocumentV1 {
    pub generated_at: String,
    pub pairs: BTreeMap<String, ExportPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualizations: Option<BTreeMap<String, ChartSpec>>,
}
