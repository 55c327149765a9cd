//! Axum surface: the dashboard page plus the JSON API the page consumes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use tickercast_core::{ticker_catalog, CatalogEntry, Ticker, UserSelection};

use crate::controller::{Controller, DashboardData};
use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    ticker: String,
    horizon_years: u32,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/tickers", get(tickers))
        .route("/api/dashboard", get(dashboard))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the task is cancelled.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "dashboard listening");
    axum::serve(listener, router(state)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn tickers() -> Json<Vec<CatalogEntry>> {
    Json(ticker_catalog())
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<(StatusCode, Json<DashboardData>), ApiError> {
    let ticker = Ticker::parse(&query.ticker).map_err(ApiError::Selection)?;
    let selection =
        UserSelection::new(ticker, query.horizon_years).map_err(ApiError::Selection)?;
    let data = state.controller.run(&selection).await?;
    Ok((StatusCode::OK, Json(data)))
}
