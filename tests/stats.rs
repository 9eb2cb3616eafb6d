use kira_trendqc::math::stats::{
    max, mean, mean_abs, median, min, quantile, root_mean_square, std_pop,
};

#[test]
fn median_odd_even() {
    let mut v1 = vec![3.0, 1.0, 2.0];
    assert_eq!(median(&mut v1), Some(2.0));
    let mut v2 = vec![4.0, 1.0, 2.0, 3.0];
    assert_eq!(median(&mut v2), Some(2.5));
    assert_eq!(median(&mut []), None);
}

#[test]
fn quantile_interpolates_linearly() {
    let mut v: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    assert!((quantile(&mut v, 0.25).unwrap() - 3.25).abs() < 1e-12);
    assert!((quantile(&mut v, 0.75).unwrap() - 7.75).abs() < 1e-12);
    assert_eq!(quantile(&mut v, 0.0), Some(1.0));
    assert_eq!(quantile(&mut v, 1.0), Some(10.0));
}

#[test]
fn moments_and_extremes() {
    let v = [1.0, -2.0, 3.0, -4.0];
    assert_eq!(mean(&v), Some(-0.5));
    assert_eq!(min(&v), Some(-4.0));
    assert_eq!(max(&v), Some(3.0));
    assert_eq!(mean_abs(&v), Some(2.5));
    assert!((root_mean_square(&v).unwrap() - 7.5f64.sqrt()).abs() < 1e-12);
    assert!((std_pop(&[1.0, 3.0]).unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(mean(&[]), None);
    assert_eq!(std_pop(&[]), None);
}
