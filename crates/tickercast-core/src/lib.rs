//! # Tickercast Core
//!
//! Domain contracts and data plumbing for the tickercast dashboard.
//!
//! ## Overview
//!
//! This crate provides the foundational pieces of the data-to-forecast
//! pipeline:
//!
//! - **Validated domain models** for tickers, daily OHLC records, and price
//!   series with strictly ascending, duplicate-free dates
//! - **Data source trait** for history providers, plus the Yahoo chart
//!   adapter with a deterministic mock mode for offline tests
//! - **Process-lifetime cache** so repeated dashboard interactions never
//!   re-fetch a ticker
//! - **HTTP transport abstraction** so adapters stay testable without a
//!   network
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo chart API) |
//! | [`cache`] | Per-ticker memoization of fetched series |
//! | [`data_source`] | Data source trait and request/error types |
//! | [`domain`] | Domain models (Ticker, PriceRecord, PriceSeries, UserSelection) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickercast_core::{DataCache, Ticker, YahooAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = DataCache::new(Arc::new(YahooAdapter::default()));
//!     let ticker = Ticker::parse("AAPL")?;
//!
//!     let series = cache.get_or_fetch(&ticker).await?;
//!     println!("{} records loaded", series.len());
//!
//!     // Second call is served from memory.
//!     let again = cache.get_or_fetch(&ticker).await?;
//!     assert_eq!(series.len(), again.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;

pub use adapters::YahooAdapter;

pub use cache::{DataCache, DataFetchError};

pub use data_source::{DataSource, HistoryRequest, SourceError, SourceErrorKind};

pub use domain::{
    ticker_catalog, CatalogEntry, PriceRecord, PriceSeries, Ticker, UserSelection, HISTORY_START,
};

pub use error::{CoreError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
