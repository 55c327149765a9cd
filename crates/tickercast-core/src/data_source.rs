//! Data source trait and request/error types.
//!
//! The [`DataSource`] contract is the seam between the pipeline and the
//! market-data provider: one endpoint, daily OHLC history over a date range.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use time::{Date, OffsetDateTime};

use crate::domain::HISTORY_START;
use crate::{PriceSeries, Ticker};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    NoData,
    Internal,
}

/// Structured source error surfaced to the cache layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NoData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::NoData => "source.no_data",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub ticker: Ticker,
    pub start: Date,
    pub end: Date,
}

impl HistoryRequest {
    pub fn new(ticker: Ticker, start: Date, end: Date) -> Result<Self, SourceError> {
        if start >= end {
            return Err(SourceError::invalid_request(format!(
                "history range start {start} must precede end {end}"
            )));
        }
        Ok(Self { ticker, start, end })
    }

    /// The dashboard range: the fixed epoch through the current UTC date.
    pub fn fixed_epoch(ticker: Ticker) -> Result<Self, SourceError> {
        let today = OffsetDateTime::now_utc().date();
        Self::new(ticker, HISTORY_START, today)
    }
}

/// History provider contract.
///
/// Implementations must be `Send + Sync`; the trait uses boxed futures so
/// adapters stay object-safe behind `Arc<dyn DataSource>`.
pub trait DataSource: Send + Sync {
    /// Short provider identifier used in logs.
    fn id(&self) -> &'static str;

    /// Fetches daily OHLC history for the requested range.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the provider is unavailable, rate limited,
    /// rejects the request, or replies with an unparseable payload.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}
