use chrono::{Duration, NaiveDate, NaiveDateTime};
use kira_trendqc::config::TransformConfig;
use kira_trendqc::error::PipelineError;
use kira_trendqc::math::rolling::{pct_change, rolling_mean};
use kira_trendqc::series::{Point, Series, SeriesMap};
use kira_trendqc::transform::{TrendDirection, transform_all, transform_series};

fn day(i: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(i)
}

fn series(category: &str, values: &[f64]) -> Series {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| Point {
            ts: day(i as i64),
            value: Some(*v),
        })
        .collect();
    Series::new(category, points)
}

#[test]
fn rolling_mean_respects_min_periods() {
    let values: Vec<Option<f64>> = (0..6).map(|i| Some(i as f64)).collect();
    let ma = rolling_mean(&values, 3, 3);
    assert_eq!(ma, vec![None, None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);

    let ma = rolling_mean(&values, 30, 3);
    assert_eq!(ma[2], Some(1.0));
    assert_eq!(ma[5], Some(2.5));
}

#[test]
fn pct_change_against_predecessor() {
    let values = vec![Some(10.0), Some(12.0), Some(0.0), Some(5.0)];
    let pct = pct_change(&values);
    assert_eq!(pct[0], None);
    assert!((pct[1].unwrap() - 0.2).abs() < 1e-12);
    assert!((pct[2].unwrap() + 1.0).abs() < 1e-12);
    assert_eq!(pct[3], None);
}

#[test]
fn features_and_metrics_for_rising_series() {
    let values: Vec<f64> = (10..20).map(|v| v as f64).collect();
    let (t, m) = transform_series(&series("A", &values), &TransformConfig::default()).unwrap();

    assert_eq!(t.series.len(), 10);
    let ma7 = t.features.moving_average(7).unwrap();
    assert_eq!(ma7[1], None);
    assert_eq!(ma7[2], Some(11.0));
    assert_eq!(ma7[9], Some(16.0));
    let ma30 = t.features.moving_average(30).unwrap();
    assert_eq!(ma30[9], Some(14.5));
    assert!((t.features.pct_change[1].unwrap() - 0.1).abs() < 1e-12);

    assert_eq!(m.trend_direction, TrendDirection::Increasing);
    assert!((m.growth_rate.unwrap() - 0.9).abs() < 1e-12);
    assert_eq!(m.moving_average["7d"], Some(16.0));
    assert_eq!(m.moving_average["30d"], Some(14.5));
}

#[test]
fn small_growth_is_stable() {
    let values = [100.0, 101.0, 100.0, 102.0, 101.0, 103.0];
    let (_, m) = transform_series(&series("A", &values), &TransformConfig::default()).unwrap();
    assert_eq!(m.trend_direction, TrendDirection::Stable);
}

#[test]
fn falling_series_is_decreasing() {
    let values = [50.0, 45.0, 40.0, 30.0, 20.0];
    let (_, m) = transform_series(&series("A", &values), &TransformConfig::default()).unwrap();
    assert_eq!(m.trend_direction, TrendDirection::Decreasing);
    assert!((m.growth_rate.unwrap() + 0.6).abs() < 1e-12);
}

#[test]
fn single_point_has_unknown_trend() {
    let (_, m) = transform_series(&series("A", &[5.0]), &TransformConfig::default()).unwrap();
    assert_eq!(m.trend_direction, TrendDirection::Unknown);
    assert_eq!(m.moving_average["7d"], None);
}

#[test]
fn all_null_series_is_rejected() {
    let s = Series::new(
        "A",
        vec![
            Point {
                ts: day(0),
                value: None,
            },
            Point {
                ts: day(1),
                value: None,
            },
        ],
    );
    let err = transform_series(&s, &TransformConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::NoValidData { .. }));
}

#[test]
fn batch_keeps_keys_aligned() {
    let mut input = SeriesMap::new();
    for (cat, values) in [("A", vec![1.0, 2.0, 3.0]), ("B", vec![3.0, 2.0, 1.0])] {
        let s = series(cat, &values);
        input.insert(s.key.clone(), s);
    }
    let outcome = transform_all(input, &TransformConfig::default(), 0).unwrap();
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        outcome.series.keys().collect::<Vec<_>>(),
        outcome.metrics.keys().collect::<Vec<_>>()
    );
    assert_eq!(outcome.metrics["category_B"].trend_direction, TrendDirection::Decreasing);
}
