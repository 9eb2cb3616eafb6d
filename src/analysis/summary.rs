use std::collections::BTreeMap;

use crate::analysis::AnalysisResult;
use crate::clean::QualityMetrics;
use crate::numeric::{format_decimal, format_percent};
use crate::schema::v1::{
    AnalysisSummary, CurrentStats, ForecastSummary, GrowthSummary, IssuesHandled, QualitySummary,
    QuickResult, RecordCounts, TransformTrendSummary, TransformationSummary, TrendSummary,
};
use crate::transform::TransformationMetrics;

const RECENT_WINDOW: usize = 7;

pub fn analysis_summary(result: &AnalysisResult) -> AnalysisSummary {
    let trend = &result.trend_analysis;
    let stats = &result.basic_stats;
    AnalysisSummary {
        trend: TrendSummary {
            direction: trend.direction,
            strength: trend.strength,
            significant: trend.significant,
        },
        growth: GrowthSummary {
            total: format_percent(result.growth_metrics.total_growth),
            recent: format_percent(result.growth_metrics.window(RECENT_WINDOW).flatten()),
        },
        current_stats: CurrentStats {
            last_value: stats.last_value,
            mean: stats.mean,
            std: stats.std,
        },
        forecast: ForecastSummary {
            available: result.forecast.is_some(),
            metrics: result.forecast.as_ref().map(|f| f.metrics.clone()),
        },
    }
}

pub fn quick_result(result: &AnalysisResult) -> QuickResult {
    QuickResult {
        trend: result.trend_analysis.direction,
        growth: format_percent(result.growth_metrics.total_growth),
        current_value: result.basic_stats.last_value,
    }
}

pub fn cleaning_summary(metrics: &QualityMetrics) -> QualitySummary {
    QualitySummary {
        records: RecordCounts {
            initial: metrics.total_records,
            cleaned: metrics.clean_records,
            removed: metrics.total_records.saturating_sub(metrics.clean_records),
        },
        issues_handled: IssuesHandled {
            missing_values: metrics.missing_count,
            duplicates: metrics.duplicate_count,
            outliers: metrics.outlier_count,
        },
        quality_score: metrics.quality_score(),
    }
}

pub fn transformation_summary(metrics: &TransformationMetrics) -> TransformationSummary {
    let moving_averages: BTreeMap<String, Option<String>> = metrics
        .moving_average
        .iter()
        .map(|(window, value)| (window.clone(), format_decimal(*value)))
        .collect();
    TransformationSummary {
        trend: TransformTrendSummary {
            direction: metrics.trend_direction,
            growth_rate: format_percent(metrics.growth_rate),
        },
        moving_averages,
    }
}
