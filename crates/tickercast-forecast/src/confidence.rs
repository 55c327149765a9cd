//! Residual-based uncertainty bands.

/// Symmetric confidence band derived from fit residuals.
///
/// The standard error grows with the forecast step as `sigma * sqrt(h + 1)`,
/// so in-sample rows (`h = 0`) get a constant band and future rows widen
/// monotonically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBand {
    sigma: f64,
    z: f64,
}

impl ConfidenceBand {
    /// Build a band from residuals at the given confidence level.
    pub fn from_residuals(residuals: &[f64], confidence_level: f64) -> Self {
        let n = residuals.len() as f64;
        let sigma = if residuals.is_empty() {
            0.0
        } else {
            let mean = residuals.iter().sum::<f64>() / n;
            let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
            variance.sqrt()
        };

        Self {
            sigma,
            z: z_score(confidence_level),
        }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// `(lower, upper)` around `yhat`, `steps_ahead` days past the last
    /// training date (0 for in-sample rows).
    pub fn interval(&self, yhat: f64, steps_ahead: u32) -> (f64, f64) {
        let se = self.sigma * f64::from(steps_ahead + 1).sqrt();
        (yhat - self.z * se, yhat + self.z * se)
    }
}

/// Z-score for a confidence level (approximate lookup).
fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.96,
    }
}
