use chrono::{Duration, NaiveDate, NaiveDateTime};
use kira_trendqc::clean::impute::{backward_fill, forward_fill, impute, interpolate_linear};
use kira_trendqc::clean::outliers::{clip_outliers, iqr_bounds};
use kira_trendqc::clean::{clean_all, clean_series};
use kira_trendqc::config::CleanerConfig;
use kira_trendqc::error::PipelineError;
use kira_trendqc::series::{Point, Series, SeriesMap};

fn day(i: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(i)
}

fn series(category: &str, values: &[Option<f64>]) -> Series {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| Point {
            ts: day(i as i64),
            value: *v,
        })
        .collect();
    Series::new(category, points)
}

fn point(i: i64, value: Option<f64>) -> Point {
    Point { ts: day(i), value }
}

fn present(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|v| Some(*v)).collect()
}

#[test]
fn iqr_clips_outlier_to_upper_bound() {
    let input = [10.0, 12.0, 11.0, 13.0, 14.0, 100.0, 15.0, 16.0, 17.0, 18.0];
    let bounds = iqr_bounds(&input, 1.5).unwrap();
    assert!((bounds.q1 - 12.25).abs() < 1e-9);
    assert!((bounds.q3 - 16.75).abs() < 1e-9);
    assert!((bounds.lower - 5.5).abs() < 1e-9);
    assert!((bounds.upper - 23.5).abs() < 1e-9);

    let config = CleanerConfig::default();
    let (cleaned, quality) = clean_series(&series("A", &present(&input)), &config).unwrap();
    assert_eq!(quality.outlier_count, 1);
    assert_eq!(quality.total_records, 10);
    assert_eq!(quality.clean_records, 10);
    assert_eq!(quality.quality_score(), Some(100.0));
    assert_eq!(cleaned.values()[5], Some(23.5));
    assert_eq!(cleaned.len(), input.len());
}

#[test]
fn clipped_values_lie_within_bounds() {
    let mut values = vec![-50.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 80.0, 90.0];
    let bounds = iqr_bounds(&values, 1.5).unwrap();
    let outside = values
        .iter()
        .filter(|v| **v < bounds.lower || **v > bounds.upper)
        .count();
    let clipped = clip_outliers(&mut values, &bounds);
    assert_eq!(clipped, outside);
    assert!(values.iter().all(|v| *v >= bounds.lower && *v <= bounds.upper));
}

#[test]
fn cleaning_is_idempotent() {
    let input = present(&[10.0, 12.0, 11.0, 13.0, 14.0, 100.0, 15.0, 16.0, 17.0, 18.0]);
    let config = CleanerConfig::default();
    let (once, _) = clean_series(&series("A", &input), &config).unwrap();
    let (twice, quality) = clean_series(&once, &config).unwrap();
    assert_eq!(once, twice);
    assert_eq!(quality.outlier_count, 0);
    assert_eq!(quality.missing_count, 0);
}

#[test]
fn too_many_missing_rejected_before_imputation() {
    let mut values = present(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    for i in [1, 3, 5, 7] {
        values[i] = None;
    }
    let err = clean_series(&series("A", &values), &CleanerConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::TooManyMissing { missing: 4, total: 10 }));
}

#[test]
fn short_series_rejected() {
    let config = CleanerConfig::default();
    let err = clean_series(&series("A", &present(&[1.0, 2.0])), &config).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData { required: 3, actual: 2 }));
}

#[test]
fn missing_values_imputed() {
    let mut values = present(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    values[0] = None;
    values[3] = None;
    let config = CleanerConfig::default();
    let (cleaned, quality) = clean_series(&series("A", &values), &config).unwrap();
    assert_eq!(quality.missing_count, 2);
    assert_eq!(cleaned.missing_count(), 0);
    assert_eq!(cleaned.values()[0], Some(2.0));
    assert_eq!(cleaned.values()[3], Some(3.0));
}

#[test]
fn impute_order_is_ffill_interpolate_bfill() {
    let mut v = vec![None, Some(1.0), None, None, Some(4.0), None];
    forward_fill(&mut v);
    assert_eq!(v, vec![None, Some(1.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)]);

    let mut v = vec![None, Some(1.0), None, None, Some(4.0), None];
    interpolate_linear(&mut v);
    assert_eq!(v, vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0), None]);

    let mut v = vec![None, None, Some(3.0)];
    backward_fill(&mut v);
    assert_eq!(v, vec![Some(3.0), Some(3.0), Some(3.0)]);

    let filled = impute(&[None, Some(1.0), None, Some(4.0)]);
    assert_eq!(filled, vec![Some(1.0), Some(1.0), Some(1.0), Some(4.0)]);
}

#[test]
fn duplicate_timestamps_keep_first() {
    let points = vec![
        point(0, Some(1.0)),
        point(1, Some(2.0)),
        point(1, Some(9.0)),
        point(2, Some(3.0)),
        point(3, Some(4.0)),
    ];
    let config = CleanerConfig::default();
    let (cleaned, quality) = clean_series(&Series::new("A", points), &config).unwrap();
    assert_eq!(quality.duplicate_count, 1);
    assert_eq!(quality.total_records, 5);
    assert_eq!(quality.clean_records, 4);
    assert_eq!(quality.quality_score(), Some(80.0));
    assert_eq!(cleaned.values(), vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn batch_drops_failing_series_only() {
    let mut input = SeriesMap::new();
    let good = series("A", &present(&[1.0, 2.0, 3.0, 4.0]));
    let bad = series("B", &[Some(1.0), None, None, Some(4.0)]);
    input.insert(good.key.clone(), good);
    input.insert(bad.key.clone(), bad);

    let outcome = clean_all(input, &CleanerConfig::default(), 2).unwrap();
    assert_eq!(outcome.series.keys().collect::<Vec<_>>(), vec!["category_A"]);
    assert!(outcome.quality.contains_key("category_A"));
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("category_B"));
}
