//! # tickercast-forecast
//!
//! Univariate forecasting for the tickercast dashboard.
//!
//! The [`ForecastEngine`] trait is the seam the pipeline consumes: fit a
//! `(date, value)` series, extend it `horizon_days` into the future with
//! uncertainty bounds, and decompose the fit into trend and periodic
//! components. The bundled [`SeasonalTrendEngine`] is a deterministic
//! additive model (linear trend + weekly and yearly seasonality +
//! residual-derived confidence bands); heavier engines plug in through the
//! same trait.

mod confidence;
mod engine;
mod seasonal;

pub use confidence::ConfidenceBand;
pub use engine::{
    ComponentRow, ComponentsBreakdown, FittedModel, ForecastEngine, ForecastError, ForecastPoint,
    ForecastResult, Observation,
};
pub use seasonal::SeasonalTrendEngine;
