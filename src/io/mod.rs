use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::chart::Visualizations;
use crate::series::{FeatureColumns, SeriesMap};
use crate::transform::TransformationMetrics;

pub mod csv_writer;
pub mod json_writer;
pub mod summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// `analysis_export_<YYYYMMDD_HHMMSS>.<ext>`
pub fn export_filename(at: &DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "analysis_export_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn export_path(out_dir: &Path, at: &DateTime<Utc>, format: ExportFormat) -> PathBuf {
    out_dir.join(export_filename(at, format))
}

/// Borrowed view over everything an exporter needs.
#[derive(Debug, Clone, Copy)]
pub struct ExportView<'a> {
    pub series: &'a SeriesMap,
    pub features: &'a BTreeMap<String, FeatureColumns>,
    pub analysis: &'a BTreeMap<String, AnalysisResult>,
    pub transformation: &'a BTreeMap<String, TransformationMetrics>,
    pub visualizations: Option<&'a Visualizations>,
}

/// Serialized export payload for the requested format.
pub fn render_export(
    view: &ExportView<'_>,
    format: ExportFormat,
    generated_at: &str,
) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => csv_writer::export_csv(view),
        ExportFormat::Json => {
            let doc = json_writer::build_export_document(view, generated_at);
            serde_json::to_vec(&doc).context("failed to serialize JSON export")
        }
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
