use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::batch::process_keyed;
use crate::config::CleanerConfig;
use crate::error::PipelineError;
use crate::numeric::round_to;
use crate::series::{Point, Series, SeriesMap};

pub mod impute;
pub mod outliers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub missing_count: usize,
    pub duplicate_count: usize,
    pub outlier_count: usize,
    pub total_records: usize,
    pub clean_records: usize,
}

impl QualityMetrics {
    /// `clean / total * 100`, two decimals.
    pub fn quality_score(&self) -> Option<f64> {
        if self.total_records == 0 {
            return None;
        }
        Some(round_to(
            self.clean_records as f64 / self.total_records as f64 * 100.0,
            2,
        ))
    }
}

#[derive(Debug)]
pub struct CleanOutcome {
    pub series: SeriesMap,
    pub quality: BTreeMap<String, QualityMetrics>,
    pub warnings: Vec<String>,
}

pub fn clean_series(
    series: &Series,
    config: &CleanerConfig,
) -> std::result::Result<(Series, QualityMetrics), PipelineError> {
    let total = series.len();
    if total < config.min_records {
        return Err(PipelineError::InsufficientData {
            required: config.min_records,
            actual: total,
        });
    }

    let missing = series.missing_count();
    if missing as f64 / total as f64 > config.max_missing_pct {
        return Err(PipelineError::TooManyMissing { missing, total });
    }

    let imputed = impute::impute(&series.values());
    let filled = series.with_values(imputed);

    let (deduped, duplicate_count) = drop_duplicate_timestamps(&filled.points);

    let mut values: Vec<f64> = deduped.iter().filter_map(|p| p.value).collect();
    if values.len() != deduped.len() || values.is_empty() {
        return Err(PipelineError::NoValidData { stage: "imputation" });
    }
    let outlier_count = match outliers::iqr_bounds(&values, config.outlier_threshold) {
        Some(bounds) => {
            let clipped = outliers::clip_outliers(&mut values, &bounds);
            if clipped > 0 {
                debug!(
                    key = %series.key,
                    lower = bounds.lower,
                    upper = bounds.upper,
                    clipped,
                    "outliers_clipped"
                );
            }
            clipped
        }
        None => 0,
    };

    let points: Vec<Point> = deduped
        .iter()
        .zip(values)
        .map(|(p, v)| Point {
            ts: p.ts,
            value: Some(v),
        })
        .collect();
    let clean_records = points.len();
    let cleaned = Series {
        key: series.key.clone(),
        category: series.category.clone(),
        points,
    };

    Ok((
        cleaned,
        QualityMetrics {
            missing_count: missing,
            duplicate_count,
            outlier_count,
            total_records: total,
            clean_records,
        },
    ))
}

/// Keeps the first point of every run of equal timestamps. Input must be
/// ordered by timestamp.
fn drop_duplicate_timestamps(points: &[Point]) -> (Vec<Point>, usize) {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    let mut duplicates = 0usize;
    for p in points {
        if out.last().is_some_and(|last| last.ts == p.ts) {
            duplicates += 1;
            continue;
        }
        out.push(*p);
    }
    (out, duplicates)
}

pub fn clean_all(
    series: SeriesMap,
    config: &CleanerConfig,
    threads: usize,
) -> Result<CleanOutcome> {
    let outcome = process_keyed("cleaning", series, threads, |key, s: Series| {
        info!(key, "cleaning series");
        clean_series(&s, config)
    })?;
    let warnings = outcome.warnings("cleaning");

    let mut cleaned = SeriesMap::new();
    let mut quality = BTreeMap::new();
    for (key, (s, metrics)) in outcome.ok {
        if s.is_empty() {
            continue;
        }
        cleaned.insert(key.clone(), s);
        quality.insert(key, metrics);
    }

    Ok(CleanOutcome {
        series: cleaned,
        quality,
        warnings,
    })
}
