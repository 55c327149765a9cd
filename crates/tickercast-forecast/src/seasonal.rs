//! Bundled additive trend + seasonality engine.
//!
//! The model is `y(t) = trend(t) + weekly(dow) + yearly(doy) + residual`:
//! an ordinary-least-squares linear trend over the day index, centered
//! day-of-week means, and a smoothed day-of-year curve that only activates
//! once the series spans two full years. Uncertainty comes from the residual
//! spread (see [`ConfidenceBand`]).

use time::Date;
use tracing::debug;

use crate::confidence::ConfidenceBand;
use crate::engine::{
    validate_observations, ComponentRow, ComponentsBreakdown, FittedModel, ForecastEngine,
    ForecastError, ForecastPoint, ForecastResult, Observation,
};

/// Yearly seasonality needs two full cycles of data before it is estimated;
/// below that the component stays zero.
const YEARLY_MIN_SPAN_DAYS: i64 = 730;

/// Half-width of the circular day-of-year smoothing window.
const YEARLY_SMOOTH_HALF_WINDOW: usize = 7;

const DOY_BUCKETS: usize = 366;
const DOW_BUCKETS: usize = 7;

/// Deterministic additive decomposition engine.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalTrendEngine {
    confidence_level: f64,
}

impl SeasonalTrendEngine {
    pub fn new(confidence_level: f64) -> Self {
        Self { confidence_level }
    }
}

impl Default for SeasonalTrendEngine {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl ForecastEngine for SeasonalTrendEngine {
    fn name(&self) -> &'static str {
        "seasonal_trend"
    }

    fn fit(&self, observations: &[Observation]) -> Result<Box<dyn FittedModel>, ForecastError> {
        validate_observations(observations)?;

        let start = observations[0].ds;
        let last = observations[observations.len() - 1].ds;
        let n = observations.len() as f64;

        let t: Vec<f64> = observations
            .iter()
            .map(|o| (o.ds - start).whole_days() as f64)
            .collect();

        let mean_t = t.iter().sum::<f64>() / n;
        let mean_y = observations.iter().map(|o| o.y).sum::<f64>() / n;

        let var_t: f64 = t.iter().map(|v| (v - mean_t).powi(2)).sum();
        let cov: f64 = t
            .iter()
            .zip(observations.iter())
            .map(|(v, o)| (v - mean_t) * (o.y - mean_y))
            .sum();

        // Dates are strictly ascending and len >= MIN_OBSERVATIONS, so the
        // index variance is never zero.
        let slope = cov / var_t;
        let intercept = mean_y - slope * mean_t;

        let detrended: Vec<f64> = t
            .iter()
            .zip(observations.iter())
            .map(|(v, o)| o.y - (intercept + slope * v))
            .collect();

        let weekly = fit_weekly(observations, &detrended);

        let residual_after_weekly: Vec<f64> = observations
            .iter()
            .zip(detrended.iter())
            .map(|(o, d)| d - weekly[dow_index(o.ds)])
            .collect();

        let span_days = (last - start).whole_days();
        let yearly = if span_days >= YEARLY_MIN_SPAN_DAYS {
            Some(fit_yearly(observations, &residual_after_weekly))
        } else {
            None
        };

        let residuals: Vec<f64> = observations
            .iter()
            .zip(residual_after_weekly.iter())
            .map(|(o, r)| r - yearly_at(&yearly, o.ds))
            .collect();

        let band = ConfidenceBand::from_residuals(&residuals, self.confidence_level);

        debug!(
            observations = observations.len(),
            slope,
            sigma = band.sigma(),
            yearly_enabled = yearly.is_some(),
            "fitted seasonal trend model"
        );

        Ok(Box::new(SeasonalModel {
            train_dates: observations.iter().map(|o| o.ds).collect(),
            start,
            last,
            intercept,
            slope,
            weekly,
            yearly,
            band,
        }))
    }
}

/// Fitted state of [`SeasonalTrendEngine`].
struct SeasonalModel {
    train_dates: Vec<Date>,
    start: Date,
    last: Date,
    intercept: f64,
    slope: f64,
    weekly: [f64; DOW_BUCKETS],
    yearly: Option<Vec<f64>>,
    band: ConfidenceBand,
}

impl SeasonalModel {
    fn trend_at(&self, ds: Date) -> f64 {
        let t = (ds - self.start).whole_days() as f64;
        self.intercept + self.slope * t
    }

    fn point_at(&self, ds: Date) -> ForecastPoint {
        let yhat = self.trend_at(ds) + self.weekly[dow_index(ds)] + yearly_at(&self.yearly, ds);

        let steps_ahead = if ds > self.last {
            (ds - self.last).whole_days().max(0) as u32
        } else {
            0
        };

        let (yhat_lower, yhat_upper) = self.band.interval(yhat, steps_ahead);
        ForecastPoint {
            ds,
            yhat,
            yhat_lower,
            yhat_upper,
        }
    }
}

impl FittedModel for SeasonalModel {
    fn predict(&self, horizon_days: u32) -> ForecastResult {
        let mut points = Vec::with_capacity(self.train_dates.len() + horizon_days as usize);

        for &ds in &self.train_dates {
            points.push(self.point_at(ds));
        }

        let mut ds = self.last;
        for _ in 0..horizon_days {
            ds = match ds.next_day() {
                Some(next) => next,
                None => break,
            };
            points.push(self.point_at(ds));
        }

        ForecastResult::new(points)
    }

    fn decompose(&self, forecast: &ForecastResult) -> ComponentsBreakdown {
        let rows = forecast
            .points()
            .iter()
            .map(|point| ComponentRow {
                ds: point.ds,
                trend: self.trend_at(point.ds),
                weekly: self.weekly[dow_index(point.ds)],
                yearly: yearly_at(&self.yearly, point.ds),
            })
            .collect();

        ComponentsBreakdown { rows }
    }
}

fn dow_index(ds: Date) -> usize {
    ds.weekday().number_days_from_monday() as usize
}

fn doy_index(ds: Date) -> usize {
    ds.ordinal() as usize - 1
}

/// Centered day-of-week means over the detrended series. Buckets with no
/// observations (weekends in trading data) stay at zero.
fn fit_weekly(observations: &[Observation], detrended: &[f64]) -> [f64; DOW_BUCKETS] {
    let mut sums = [0.0; DOW_BUCKETS];
    let mut counts = [0usize; DOW_BUCKETS];

    for (observation, value) in observations.iter().zip(detrended.iter()) {
        let bucket = dow_index(observation.ds);
        sums[bucket] += value;
        counts[bucket] += 1;
    }

    let total: f64 = sums.iter().sum();
    let observed: usize = counts.iter().sum();
    let grand = total / observed as f64;

    let mut weekly = [0.0; DOW_BUCKETS];
    for bucket in 0..DOW_BUCKETS {
        if counts[bucket] > 0 {
            weekly[bucket] = sums[bucket] / counts[bucket] as f64 - grand;
        }
    }
    weekly
}

/// Smoothed, centered day-of-year means over the weekly-adjusted residuals.
/// The smoothing window wraps around the year boundary; empty windows stay
/// at zero.
fn fit_yearly(observations: &[Observation], values: &[f64]) -> Vec<f64> {
    let mut sums = vec![0.0; DOY_BUCKETS];
    let mut counts = vec![0usize; DOY_BUCKETS];

    for (observation, value) in observations.iter().zip(values.iter()) {
        let bucket = doy_index(observation.ds);
        sums[bucket] += value;
        counts[bucket] += 1;
    }

    let mut yearly = vec![0.0; DOY_BUCKETS];
    for bucket in 0..DOY_BUCKETS {
        let mut window_sum = 0.0;
        let mut window_count = 0usize;
        for offset in 0..=(2 * YEARLY_SMOOTH_HALF_WINDOW) {
            let index =
                (bucket + DOY_BUCKETS + offset - YEARLY_SMOOTH_HALF_WINDOW) % DOY_BUCKETS;
            window_sum += sums[index];
            window_count += counts[index];
        }
        if window_count > 0 {
            yearly[bucket] = window_sum / window_count as f64;
        }
    }

    // Re-center using the observed-day weights so the component does not
    // shift the trend level.
    let observed: usize = counts.iter().sum();
    let grand: f64 = yearly
        .iter()
        .zip(counts.iter())
        .map(|(value, &count)| value * count as f64)
        .sum::<f64>()
        / observed as f64;
    for value in &mut yearly {
        *value -= grand;
    }

    yearly
}

fn yearly_at(yearly: &Option<Vec<f64>>, ds: Date) -> f64 {
    match yearly {
        Some(curve) => curve[doy_index(ds)],
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    /// Contiguous daily observations: linear trend plus a weekday bump.
    fn trended_series(start: Date, days: usize) -> Vec<Observation> {
        let mut observations = Vec::with_capacity(days);
        let mut ds = start;
        for i in 0..days {
            let trend = 100.0 + 0.5 * i as f64;
            let weekly = match ds.weekday().number_days_from_monday() {
                0 => 1.5,
                4 => -1.5,
                _ => 0.0,
            };
            observations.push(Observation::new(ds, trend + weekly));
            ds = ds.next_day().expect("test dates stay in range");
        }
        observations
    }

    #[test]
    fn forecast_covers_history_plus_horizon() {
        let observations = trended_series(date!(2023 - 01 - 02), 120);
        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");

        let forecast = model.predict(365);
        assert_eq!(forecast.len(), observations.len() + 365);

        for (observation, point) in observations.iter().zip(forecast.points()) {
            assert_eq!(observation.ds, point.ds);
        }
    }

    #[test]
    fn future_dates_are_daily_contiguous_after_history() {
        let observations = trended_series(date!(2023 - 01 - 02), 90);
        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");

        let forecast = model.predict(10);
        let future = &forecast.points()[observations.len()..];

        let last_train = observations.last().expect("non-empty").ds;
        assert_eq!(future[0].ds, last_train.next_day().expect("in range"));
        for pair in future.windows(2) {
            assert_eq!(pair[1].ds, pair[0].ds.next_day().expect("in range"));
        }
    }

    #[test]
    fn recovers_linear_trend_and_weekly_shape() {
        let observations = trended_series(date!(2023 - 01 - 02), 140);
        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");

        let forecast = model.predict(30);

        // In-sample estimates should track the noiseless construction.
        for (observation, point) in observations.iter().zip(forecast.points()) {
            assert!(
                (observation.y - point.yhat).abs() < 0.5,
                "in-sample estimate drifted: {} vs {}",
                observation.y,
                point.yhat
            );
        }

        // The future continues the 0.5/day trend.
        let far = forecast.points()[forecast.len() - 1];
        let expected = 100.0 + 0.5 * (140.0 - 1.0 + 30.0);
        assert!((far.yhat - expected).abs() < 3.0);
    }

    #[test]
    fn bands_bracket_and_widen_into_the_future() {
        // Add deterministic wobble so the residual spread is non-zero.
        let mut observations = trended_series(date!(2023 - 01 - 02), 120);
        for (i, observation) in observations.iter_mut().enumerate() {
            observation.y += ((i * 13) % 11) as f64 / 10.0;
        }

        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");
        let forecast = model.predict(60);

        for point in forecast.points() {
            assert!(point.yhat_lower <= point.yhat);
            assert!(point.yhat_upper >= point.yhat);
        }

        let future = &forecast.points()[observations.len()..];
        let width = |p: &ForecastPoint| p.yhat_upper - p.yhat_lower;
        assert!(width(&future[59]) > width(&future[0]));
    }

    #[test]
    fn yearly_component_stays_zero_under_two_years() {
        let observations = trended_series(date!(2023 - 01 - 02), 200);
        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");

        let forecast = model.predict(30);
        let components = model.decompose(&forecast);

        assert_eq!(components.rows.len(), forecast.len());
        assert!(components.rows.iter().all(|row| row.yearly == 0.0));
    }

    #[test]
    fn yearly_component_activates_after_two_years() {
        // Three years of data with an annual sine wave on top of the trend.
        let mut observations = trended_series(date!(2021 - 01 - 04), 1100);
        for observation in observations.iter_mut() {
            let doy = observation.ds.ordinal() as f64;
            observation.y += 5.0 * (doy / 366.0 * std::f64::consts::TAU).sin();
        }

        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");
        let forecast = model.predict(30);
        let components = model.decompose(&forecast);

        assert!(components.rows.iter().any(|row| row.yearly.abs() > 1.0));
    }

    #[test]
    fn components_sum_to_the_estimate() {
        let observations = trended_series(date!(2023 - 01 - 02), 120);
        let model = SeasonalTrendEngine::default()
            .fit(&observations)
            .expect("fit succeeds");

        let forecast = model.predict(15);
        let components = model.decompose(&forecast);

        for (point, row) in forecast.points().iter().zip(components.rows.iter()) {
            let sum = row.trend + row.weekly + row.yearly;
            assert!((sum - point.yhat).abs() < 1e-9);
        }
    }
}
