use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::analysis::AnalysisResult;
use crate::chart::Visualizations;
use crate::clean::QualityMetrics;
use crate::config::PipelineConfig;
use crate::input::InputFormat;
use crate::io::{ExportFormat, ExportView};
use crate::schema::v1::AnalysisReportV1;
use crate::series::{FeatureColumns, SeriesMap};
use crate::transform::TransformationMetrics;

/// Caller-supplied switches for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub declared_format: Option<InputFormat>,
    pub include_forecast: bool,
    pub include_visualizations: bool,
    pub export: Option<ExportFormat>,
    pub category: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            declared_format: None,
            include_forecast: true,
            include_visualizations: false,
            export: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub export_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub options: RunOptions,
    pub config: PipelineConfig,
    pub threads: usize,
    pub started_at: DateTime<Utc>,
    pub parsed_keys: Vec<String>,
    /// Working set: parsed, then cleaned, then transformed in place.
    pub series: SeriesMap,
    pub features: BTreeMap<String, FeatureColumns>,
    pub quality: BTreeMap<String, QualityMetrics>,
    pub transform_metrics: BTreeMap<String, TransformationMetrics>,
    pub analysis: BTreeMap<String, AnalysisResult>,
    pub visualizations: Visualizations,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: AnalysisReportV1,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        options: RunOptions,
        config: PipelineConfig,
    ) -> Self {
        let started_at = Utc::now();
        let json_path = out_dir.join("analysis.json");
        let report = AnalysisReportV1::empty(&format_timestamp(&started_at));
        Self {
            input,
            options,
            config,
            threads: 0,
            started_at,
            parsed_keys: Vec::new(),
            series: SeriesMap::new(),
            features: BTreeMap::new(),
            quality: BTreeMap::new(),
            transform_metrics: BTreeMap::new(),
            analysis: BTreeMap::new(),
            visualizations: Visualizations::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                export_path: None,
            },
            report,
        }
    }

    pub fn timestamp(&self) -> String {
        format_timestamp(&self.started_at)
    }

    pub fn export_view(&self) -> ExportView<'_> {
        ExportView {
            series: &self.series,
            features: &self.features,
            analysis: &self.analysis,
            transformation: &self.transform_metrics,
            visualizations: if self.options.include_visualizations {
                Some(&self.visualizations)
            } else {
                None
            },
        }
    }
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
