//! Ordinary least squares of a value sequence on its index `0..n`.

use crate::error::{PipelineError, Result};
use crate::math::stats::pow2_scale;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n_observations: usize,
}

impl LinearFit {
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(PipelineError::InsufficientData {
                required: 2,
                actual: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::Regression(
                "non-finite value in regression input".to_string(),
            ));
        }

        let scale = pow2_scale(values);
        let z: Vec<f64> = values.iter().map(|v| v / scale).collect();

        let n = z.len() as f64;
        let mean_t = (n - 1.0) / 2.0;
        let mean_z = z.iter().sum::<f64>() / n;

        let mut s_tt = 0.0;
        let mut s_tz = 0.0;
        for (i, &v) in z.iter().enumerate() {
            let dt = i as f64 - mean_t;
            s_tt += dt * dt;
            s_tz += dt * (v - mean_z);
        }
        if s_tt.abs() < 1e-10 {
            return Err(PipelineError::Regression(
                "singular design in regression".to_string(),
            ));
        }

        let slope_z = s_tz / s_tt;
        let intercept_z = mean_z - slope_z * mean_t;

        let ss_tot: f64 = z.iter().map(|&v| (v - mean_z).powi(2)).sum();
        let ss_res: f64 = z
            .iter()
            .enumerate()
            .map(|(i, &v)| (v - (intercept_z + slope_z * i as f64)).powi(2))
            .sum();

        // Constant input: a perfect fit scores 1, anything else 0.
        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        let slope = slope_z * scale;
        let intercept = intercept_z * scale;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(PipelineError::Regression(
                "regression coefficients out of range".to_string(),
            ));
        }

        Ok(Self {
            slope,
            intercept,
            r_squared,
            n_observations: values.len(),
        })
    }

    pub fn predict_at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }

    pub fn fitted(&self) -> Vec<f64> {
        (0..self.n_observations)
            .map(|i| self.predict_at(i as f64))
            .collect()
    }

    /// Predictions for indices `n..n + steps`.
    pub fn predict(&self, steps: usize) -> Vec<f64> {
        (0..steps)
            .map(|i| self.predict_at((self.n_observations + i) as f64))
            .collect()
    }

    pub fn residuals(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| y - self.predict_at(i as f64))
            .collect()
    }
}
