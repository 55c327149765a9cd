//! Per-ticker memoization of fetched price series.
//!
//! The cache lives for the process lifetime: no TTL, no eviction. Repeated
//! dashboard interactions for the same ticker are served from memory and
//! never reach the data source again.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::{PriceSeries, Ticker};

/// Failure reported by [`DataCache::get_or_fetch`]; the only error the
/// pipeline recovers from. Carries the underlying description for the
/// user-visible banner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataFetchError {
    #[error("failed to load data for {ticker}: {message}")]
    Source { ticker: Ticker, message: String },

    #[error("no price data returned for {ticker}")]
    NoData { ticker: Ticker },
}

/// Memoizing front of a [`DataSource`], keyed by ticker only.
///
/// The range is implicitly fixed (epoch through the current date), so a
/// cached series is valid for the rest of the process. Failures cache
/// nothing; the next interaction retries the fetch.
pub struct DataCache {
    source: Arc<dyn DataSource>,
    entries: tokio::sync::RwLock<HashMap<Ticker, PriceSeries>>,
}

impl DataCache {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            entries: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached series for `ticker`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DataFetchError`] when the source fails or replies with an
    /// empty series. Nothing is stored in either case.
    pub async fn get_or_fetch(&self, ticker: &Ticker) -> Result<PriceSeries, DataFetchError> {
        if let Some(series) = self.entries.read().await.get(ticker) {
            debug!(ticker = %ticker, records = series.len(), "cache hit");
            return Ok(series.clone());
        }

        let request = HistoryRequest::fixed_epoch(ticker.clone())
            .map_err(|error| source_to_fetch_error(ticker, error))?;

        let series = self
            .source
            .history(request)
            .await
            .map_err(|error| {
                warn!(ticker = %ticker, error = %error, "history fetch failed");
                source_to_fetch_error(ticker, error)
            })?;

        if series.is_empty() {
            warn!(ticker = %ticker, "history fetch returned an empty series");
            return Err(DataFetchError::NoData {
                ticker: ticker.clone(),
            });
        }

        debug!(ticker = %ticker, records = series.len(), "cache fill");
        self.entries
            .write()
            .await
            .insert(ticker.clone(), series.clone());

        Ok(series)
    }

    /// Number of tickers currently memoized.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn contains(&self, ticker: &Ticker) -> bool {
        self.entries.read().await.contains_key(ticker)
    }
}

fn source_to_fetch_error(ticker: &Ticker, error: SourceError) -> DataFetchError {
    DataFetchError::Source {
        ticker: ticker.clone(),
        message: error.message().to_owned(),
    }
}
