//! # tickercast-web
//!
//! The dashboard pipeline and its HTTP surface.
//!
//! The [`Controller`] drives the explicit interaction state machine
//! (`Idle → Loading → {Loaded, LoadFailed}`, `Loaded → Fitting → Fitted`)
//! over the cache and forecasting engine. Views are pure projections into
//! serializable chart specs and 5-row table previews; a client-side charting
//! library does the actual drawing from the JSON payloads.

pub mod controller;
pub mod error;
pub mod server;
pub mod views;

pub use controller::{Controller, DashboardData, PipelineState};
pub use error::ApiError;
pub use server::{router, serve, AppState};
pub use views::{
    forecast_panel, raw_series_panel, BandRole, ChartSpec, ComponentsChart, ForecastPanel,
    RawSeriesPanel, Trace, PREVIEW_ROWS,
};
