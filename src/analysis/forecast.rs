use tracing::warn;

use crate::analysis::{Forecast, ForecastMetrics};
use crate::math::regression::LinearFit;
use crate::math::stats::{mean_abs, root_mean_square, std_pop};
use crate::numeric::sanitize;

/// Linear extrapolation `horizon` steps past the history with a
/// `±2 * residual std` band. Error metrics describe the in-sample fit.
/// Returns `None` when the fit fails or the residual spread is undefined.
pub fn generate_forecast(values: &[f64], horizon: usize) -> Option<Forecast> {
    let fit = match LinearFit::fit(values) {
        Ok(fit) => fit,
        Err(err) => {
            warn!(reason = %err, "forecast regression failed");
            return None;
        }
    };

    let residuals = fit.residuals(values);
    let std_error = std_pop(&residuals).and_then(sanitize)?;
    let mae = mean_abs(&residuals).and_then(sanitize);
    let rmse = root_mean_square(&residuals).and_then(sanitize);

    let predictions: Vec<Option<f64>> = fit.predict(horizon).into_iter().map(sanitize).collect();
    let lower_bound = predictions
        .iter()
        .map(|p| p.and_then(|p| sanitize(p - 2.0 * std_error)))
        .collect();
    let upper_bound = predictions
        .iter()
        .map(|p| p.and_then(|p| sanitize(p + 2.0 * std_error)))
        .collect();

    Some(Forecast {
        predictions,
        lower_bound,
        upper_bound,
        metrics: ForecastMetrics {
            mae,
            rmse,
            std_error: Some(std_error),
        },
    })
}
