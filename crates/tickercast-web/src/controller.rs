//! The interaction pipeline as an explicit state machine.
//!
//! Each user interaction runs the machine once:
//! `Idle → Loading → {Loaded, LoadFailed}`; `Loaded → Fitting → Fitted`.
//! `LoadFailed` and `Fitted` are terminal for the interaction; a new
//! selection starts over at `Idle`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use tickercast_core::{DataCache, Ticker, UserSelection};
use tickercast_forecast::{ForecastEngine, ForecastError, Observation};

use crate::views::{forecast_panel, raw_series_panel, ForecastPanel, RawSeriesPanel};

/// States of one interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Fitting,
    Fitted,
}

/// Everything one interaction produced, including the visited states so the
/// machine is assertable from the outside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub ticker: Ticker,
    pub horizon_years: u32,
    pub state: PipelineState,
    pub transitions: Vec<PipelineState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawSeriesPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastPanel>,
}

/// Drives one selection through cache → raw view → engine → forecast view.
pub struct Controller {
    cache: DataCache,
    engine: Arc<dyn ForecastEngine>,
}

impl Controller {
    pub fn new(cache: DataCache, engine: Arc<dyn ForecastEngine>) -> Self {
        Self { cache, engine }
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    /// Run one interaction cycle.
    ///
    /// A data-fetch failure (including an empty series) is recovered: the
    /// machine ends in `LoadFailed` with a user-visible banner and no view
    /// is built. An engine failure is NOT recovered and propagates to the
    /// hosting surface.
    pub async fn run(&self, selection: &UserSelection) -> Result<DashboardData, ForecastError> {
        let mut transitions = vec![PipelineState::Idle, PipelineState::Loading];

        let series = match self.cache.get_or_fetch(selection.ticker()).await {
            Ok(series) => series,
            Err(error) => {
                warn!(ticker = %selection.ticker(), error = %error, "pipeline halted at load");
                transitions.push(PipelineState::LoadFailed);
                return Ok(DashboardData {
                    ticker: selection.ticker().clone(),
                    horizon_years: selection.horizon_years(),
                    state: PipelineState::LoadFailed,
                    transitions,
                    error: Some(error.to_string()),
                    raw: None,
                    forecast: None,
                });
            }
        };

        transitions.push(PipelineState::Loaded);
        let raw = raw_series_panel(&series);

        transitions.push(PipelineState::Fitting);
        let observations = Observation::from_series(&series);
        let model = self.engine.fit(&observations)?;
        let forecast = model.predict(selection.horizon_days());
        let components = model.decompose(&forecast);
        let forecast = forecast_panel(&forecast, &components, selection.horizon_years());

        transitions.push(PipelineState::Fitted);
        info!(
            ticker = %selection.ticker(),
            horizon_years = selection.horizon_years(),
            records = series.len(),
            "pipeline fitted"
        );

        Ok(DashboardData {
            ticker: selection.ticker().clone(),
            horizon_years: selection.horizon_years(),
            state: PipelineState::Fitted,
            transitions,
            error: None,
            raw: Some(raw),
            forecast: Some(forecast),
        })
    }
}
