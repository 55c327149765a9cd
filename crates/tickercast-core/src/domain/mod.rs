//! # Domain Models
//!
//! Canonical domain types for tickercast market data.
//!
//! All models are strongly typed and validated at construction time, so
//! invalid states (unordered series, out-of-range horizons, malformed
//! tickers) are unrepresentable downstream.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated instrument symbol |
//! | [`PriceRecord`] | Daily OHLC record with volume |
//! | [`PriceSeries`] | Ordered record sequence for one ticker |
//! | [`UserSelection`] | Validated dashboard input (ticker + horizon) |
//! | [`CatalogEntry`] | Entry of the fixed ticker enumeration |

mod models;
mod selection;
mod ticker;

pub use models::{PriceRecord, PriceSeries};
pub use selection::{ticker_catalog, CatalogEntry, UserSelection, HISTORY_START};
pub use ticker::Ticker;
