use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use kira_trendqc::analysis::analyze;
use kira_trendqc::clean::QualityMetrics;
use kira_trendqc::config::{AnalyticsConfig, PipelineConfig};
use kira_trendqc::ctx::{Ctx, RunOptions};
use kira_trendqc::io::json_writer::{build_quick_report, build_report};
use kira_trendqc::io::summary::{format_summary, format_validate_summary, format_warnings};
use kira_trendqc::series::{Point, Series};

fn populated_ctx() -> Ctx {
    let mut ctx = Ctx::new(
        PathBuf::from("upload.csv"),
        PathBuf::from("out"),
        RunOptions::default(),
        PipelineConfig::default(),
    );
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let points = (0..10)
        .map(|i| Point {
            ts: start + Duration::days(i),
            value: Some(10.0 + i as f64),
        })
        .collect();
    let s = Series::new("A", points);
    let result = analyze(&s, true, &AnalyticsConfig::default()).unwrap();

    ctx.parsed_keys = vec![s.key.clone(), "category_B".to_string()];
    ctx.quality.insert(
        s.key.clone(),
        QualityMetrics {
            missing_count: 1,
            duplicate_count: 2,
            outlier_count: 0,
            total_records: 12,
            clean_records: 10,
        },
    );
    ctx.analysis.insert(s.key.clone(), result);
    ctx.series.insert(s.key.clone(), s);
    ctx.warnings.push("cleaning: category_B dropped (too many missing values: 2 of 3)".to_string());
    ctx
}

#[test]
fn summary_format() {
    let ctx = populated_ctx();
    let s = format_summary(&ctx);
    assert!(s.contains("kira-trendqc v"));
    assert!(s.contains("Input: 2 series parsed, 1 cleaned, 1 analyzed"));
    assert!(s.contains("category_A: trend=increasing growth=90.00% quality=83.33"));

    let w = format_warnings(&ctx.warnings);
    assert!(w.starts_with("warnings:\n- cleaning: category_B dropped"));
    assert!(format_warnings(&[]).is_empty());
}

#[test]
fn validate_summary_lists_quality() {
    let ctx = populated_ctx();
    let s = format_validate_summary(&ctx);
    assert!(s.contains("series: 2 parsed, 1 cleaned"));
    assert!(s.contains(
        "category_A\trecords=10/12\tmissing=1\tduplicates=2\toutliers=0\tquality=83.33"
    ));
}

#[test]
fn report_blocks() {
    let ctx = populated_ctx();
    let report = serde_json::to_value(build_report(&ctx)).unwrap();
    assert_eq!(report["timestamp"], ctx.timestamp());
    let a = &report["analysis"]["category_A"];
    assert_eq!(a["trend"]["direction"], "increasing");
    assert_eq!(a["trend"]["significant"], true);
    assert_eq!(a["growth"]["total"], "90.00%");
    assert_eq!(a["growth"]["recent"], "46.15%");
    assert_eq!(a["current_stats"]["last_value"], 19.0);
    assert_eq!(a["forecast"]["available"], true);
    assert!(a["forecast"]["metrics"]["mae"].is_number());

    let q = &report["quality_metrics"]["category_A"];
    assert_eq!(q["records"]["initial"], 12);
    assert_eq!(q["records"]["cleaned"], 10);
    assert_eq!(q["records"]["removed"], 2);
    assert_eq!(q["issues_handled"]["duplicates"], 2);
    assert_eq!(q["quality_score"], 83.33);

    let quick = serde_json::to_value(build_quick_report(&ctx)).unwrap();
    assert_eq!(quick["results"]["category_A"]["trend"], "increasing");
    assert_eq!(quick["results"]["category_A"]["growth"], "90.00%");
    assert_eq!(quick["results"]["category_A"]["current_value"], 19.0);
}
