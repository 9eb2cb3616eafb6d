use std::fs;

use kira_trendqc::config::PipelineConfig;
use tempfile::TempDir;

#[test]
fn defaults_match_documented_constants() {
    let c = PipelineConfig::default();
    assert_eq!(c.cleaner.outlier_threshold, 1.5);
    assert_eq!(c.cleaner.max_missing_pct, 0.3);
    assert_eq!(c.cleaner.min_records, 3);
    assert_eq!(c.transform.ma_windows, vec![7, 30]);
    assert_eq!(c.transform.min_periods, 3);
    assert_eq!(c.transform.growth_threshold, 0.05);
    assert_eq!(c.analytics.forecast_days, 30);
    assert_eq!(c.analytics.min_points, 10);
    assert_eq!(c.analytics.growth_windows, vec![7, 30]);
    assert_eq!(c.chart.max_points, 100);
    assert_eq!(c.chart.colors.forecast, "#F28E2B");
}

#[test]
fn partial_overlay_keeps_other_defaults() {
    let c = PipelineConfig::from_json(
        r#"{"analytics": {"forecast_days": 7}, "transform": {"ma_windows": [3]}}"#,
        "inline",
    )
    .unwrap();
    assert_eq!(c.analytics.forecast_days, 7);
    assert_eq!(c.analytics.min_points, 10);
    assert_eq!(c.transform.ma_windows, vec![3]);
    assert_eq!(c.cleaner, PipelineConfig::default().cleaner);
}

#[test]
fn invalid_values_rejected() {
    assert!(PipelineConfig::from_json(r#"{"cleaner": {"max_missing_pct": 2.0}}"#, "x").is_err());
    assert!(PipelineConfig::from_json(r#"{"transform": {"ma_windows": [0]}}"#, "x").is_err());
    assert!(PipelineConfig::from_json("not json", "x").is_err());
}

#[test]
fn load_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, r#"{"chart": {"max_points": 50}}"#).unwrap();
    let c = PipelineConfig::load(&path).unwrap();
    assert_eq!(c.chart.max_points, 50);
    assert!(PipelineConfig::load(&tmp.path().join("missing.json")).is_err());
}
