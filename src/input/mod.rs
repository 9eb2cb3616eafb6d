use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::series::{Point, Series, SeriesMap, series_key};

pub mod csv_reader;
pub mod date;
pub mod json_reader;

pub const STANDARD_COLUMNS: [&str; 3] = ["date", "category", "value"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Infers the format from a file name. A trailing `.gz` is treated as
    /// transport compression and the inner extension decides.
    pub fn detect(filename: &str) -> Result<(Self, bool)> {
        let lower = filename.to_ascii_lowercase();
        let (inner, compressed) = match lower.strip_suffix(".gz") {
            Some(inner) => (inner, true),
            None => (lower.as_str(), false),
        };
        if inner.ends_with(".csv") {
            Ok((Self::Csv, compressed))
        } else if inner.ends_with(".json") {
            Ok((Self::Json, compressed))
        } else {
            Err(PipelineError::UnsupportedFormat(
                "unsupported file format, use .csv or .json".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Parses an upload into one series per distinct category, keyed `category_<value>`.
pub fn parse(content: &[u8], format: InputFormat) -> Result<SeriesMap> {
    let series = match format {
        InputFormat::Csv => csv_reader::read_csv(content)?,
        InputFormat::Json => json_reader::read_json(content)?,
    };
    info!(
        format = format.as_str(),
        series = series.len(),
        "upload_parsed"
    );
    Ok(series)
}

/// Reads an upload from disk, resolving the format from `declared` or the file name.
pub fn read_upload(path: &Path, declared: Option<InputFormat>) -> Result<(Vec<u8>, InputFormat)> {
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let compressed = filename.to_ascii_lowercase().ends_with(".gz");
    let format = match declared {
        Some(format) => format,
        None => InputFormat::detect(filename)?.0,
    };
    let raw = std::fs::read(path)?;
    let content = if compressed { gunzip(&raw)? } else { raw };
    Ok((content, format))
}

pub fn gunzip(raw: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(raw);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| PipelineError::InvalidInput(format!("invalid gzip stream: {}", e)))?;
    Ok(out)
}

pub(crate) fn check_standard_columns(columns: &[String]) -> Result<()> {
    let mut sorted: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
    sorted.sort_unstable();
    let mut expected = STANDARD_COLUMNS.to_vec();
    expected.sort_unstable();
    if sorted != expected {
        return Err(PipelineError::InvalidInput(format!(
            "expected columns date, category, value; found [{}]",
            columns.join(", ")
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub date: Option<NaiveDateTime>,
    pub category: Option<String>,
    pub value: Option<f64>,
}

/// Groups rows by category and orders each series by timestamp. The sort is
/// stable, so rows sharing a timestamp keep their upload order.
pub(crate) fn group_rows<I>(rows: I) -> SeriesMap
where
    I: IntoIterator<Item = RawRow>,
{
    let mut grouped: BTreeMap<String, Series> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in rows {
        let (Some(ts), Some(category)) = (row.date, row.category) else {
            dropped += 1;
            continue;
        };
        grouped
            .entry(series_key(&category))
            .or_insert_with(|| Series::new(&category, Vec::new()))
            .points
            .push(Point {
                ts,
                value: row.value,
            });
    }

    for series in grouped.values_mut() {
        series.points.sort_by_key(|p| p.ts);
    }

    if dropped > 0 {
        debug!(dropped, "rows_without_date_or_category_dropped");
    }
    grouped
}
