//! Engine contract and forecast data types.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use tickercast_core::PriceSeries;

/// Minimum training rows the bundled engine accepts. Anything shorter has no
/// usable weekly structure.
pub const MIN_OBSERVATIONS: usize = 30;

/// One `(date, value)` training row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub ds: Date,
    pub y: f64,
}

impl Observation {
    pub const fn new(ds: Date, y: f64) -> Self {
        Self { ds, y }
    }

    /// The `(date, close)` projection of a price series.
    pub fn from_series(series: &PriceSeries) -> Vec<Self> {
        series
            .close_points()
            .into_iter()
            .map(|(ds, y)| Self { ds, y })
            .collect()
    }
}

/// One forecast row: central estimate plus uncertainty bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: Date,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Ordered forecast rows: one per historical date plus one per future day up
/// to the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last `n` rows, in order.
    pub fn tail(&self, n: usize) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|point| point.ds)
    }
}

/// One decomposed row, aligned 1:1 with the forecast rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    pub ds: Date,
    pub trend: f64,
    pub weekly: f64,
    pub yearly: f64,
}

/// Structural breakdown of a forecast into trend and periodic components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsBreakdown {
    pub rows: Vec<ComponentRow>,
}

/// Degenerate-input errors raised by `fit`.
///
/// The pipeline does not absorb these; they propagate to the hosting
/// surface (HTTP 500 / CLI exit code).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("need at least {min} observations to fit, got {len}")]
    TooFewObservations { len: usize, min: usize },

    #[error("observation dates must be strictly ascending (violated at position {position})")]
    UnsortedObservations { position: usize },

    #[error("duplicate observation date at position {position}")]
    DuplicateDate { position: usize },

    #[error("observation value at index {index} is not finite")]
    NonFiniteValue { index: usize },
}

/// Forecasting engine contract consumed by the pipeline.
pub trait ForecastEngine: Send + Sync {
    /// Short engine identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fits a model to a strictly ascending, duplicate-free series.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError`] on degenerate input (too short, unsorted,
    /// duplicated dates, non-finite values).
    fn fit(&self, observations: &[Observation]) -> Result<Box<dyn FittedModel>, ForecastError>;
}

/// A fitted model: predicts forward and decomposes its own output.
pub trait FittedModel: Send + Sync {
    /// One row per training date, then one per future day through
    /// `horizon_days` past the last training date.
    fn predict(&self, horizon_days: u32) -> ForecastResult;

    /// Trend/weekly/yearly breakdown aligned with the forecast rows.
    fn decompose(&self, forecast: &ForecastResult) -> ComponentsBreakdown;
}

/// Shared input validation for engine implementations.
pub(crate) fn validate_observations(observations: &[Observation]) -> Result<(), ForecastError> {
    if observations.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::TooFewObservations {
            len: observations.len(),
            min: MIN_OBSERVATIONS,
        });
    }

    for (index, observation) in observations.iter().enumerate() {
        if !observation.y.is_finite() {
            return Err(ForecastError::NonFiniteValue { index });
        }
    }

    for (position, pair) in observations.windows(2).enumerate() {
        if pair[0].ds == pair[1].ds {
            return Err(ForecastError::DuplicateDate {
                position: position + 1,
            });
        }
        if pair[0].ds > pair[1].ds {
            return Err(ForecastError::UnsortedObservations {
                position: position + 1,
            });
        }
    }

    Ok(())
}
