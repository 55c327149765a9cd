//! HTTP-facing error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use tickercast_core::ValidationError;
use tickercast_forecast::ForecastError;

/// Failures a dashboard request can surface.
///
/// An invalid selection is the caller's fault and maps to 400. A model
/// failure is ours and maps to 500. Data-fetch failures never reach this
/// type: the controller recovers them into a `load_failed` payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid selection: {0}")]
    Selection(#[from] ValidationError),
    #[error("forecast failed: {0}")]
    Forecast(#[from] ForecastError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Selection(_) => StatusCode::BAD_REQUEST,
            ApiError::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Selection(_) => "invalid_selection",
            ApiError::Forecast(_) => "forecast_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));
        (self.status(), body).into_response()
    }
}
