use std::collections::BTreeMap;

use crate::analysis::summary::{
    analysis_summary, cleaning_summary, quick_result, transformation_summary,
};
use crate::ctx::Ctx;
use crate::io::ExportView;
use crate::numeric::sanitize_opt;
use crate::schema::v1::{
    AnalysisReportV1, ExportAnalysis, ExportDocumentV1, ExportPair, ExportRecord, QuickReportV1,
};
use crate::series::{FeatureColumns, Series, format_ts, ma_column_name};

pub fn build_report(ctx: &Ctx) -> AnalysisReportV1 {
    let mut report = AnalysisReportV1::empty(&ctx.timestamp());
    report.analysis = ctx
        .analysis
        .iter()
        .map(|(key, r)| (key.clone(), analysis_summary(r)))
        .collect();
    report.quality_metrics = ctx
        .quality
        .iter()
        .map(|(key, q)| (key.clone(), cleaning_summary(q)))
        .collect();
    report.visualizations = ctx.visualizations.clone();
    report
}

pub fn build_quick_report(ctx: &Ctx) -> QuickReportV1 {
    QuickReportV1 {
        timestamp: ctx.timestamp(),
        results: ctx
            .analysis
            .iter()
            .map(|(key, r)| (key.clone(), quick_result(r)))
            .collect(),
    }
}

pub fn build_export_document(view: &ExportView<'_>, generated_at: &str) -> ExportDocumentV1 {
    let empty = FeatureColumns::default();
    let pairs = view
        .series
        .iter()
        .map(|(key, series)| {
            let features = view.features.get(key).unwrap_or(&empty);
            let analysis = view.analysis.get(key).map(|r| ExportAnalysis {
                trend: r.trend_analysis.clone(),
                growth: r.growth_metrics.clone(),
                statistics: r.basic_stats.clone(),
                forecast: r.forecast.clone(),
            });
            let pair = ExportPair {
                data: export_records(series, features),
                analysis,
                transformation: view.transformation.get(key).map(transformation_summary),
            };
            (key.clone(), pair)
        })
        .collect();

    ExportDocumentV1 {
        generated_at: generated_at.to_string(),
        pairs,
        visualizations: view.visualizations.filter(|v| !v.is_empty()).cloned(),
    }
}

pub fn export_records(series: &Series, features: &FeatureColumns) -> Vec<ExportRecord> {
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut columns = BTreeMap::new();
            for (w, col) in &features.moving_averages {
                columns.insert(ma_column_name(*w), sanitize_opt(col.get(i).copied().flatten()));
            }
            if !features.pct_change.is_empty() {
                columns.insert(
                    "pct_change".to_string(),
                    sanitize_opt(features.pct_change.get(i).copied().flatten()),
                );
            }
            ExportRecord {
                date: format_ts(&p.ts),
                category: series.category.clone(),
                value: sanitize_opt(p.value),
                features: columns,
            }
        })
        .collect()
}
