use serde::{Deserialize, Serialize};
use time::macros::date;
use time::Date;

use crate::{Ticker, ValidationError};

/// Fixed start of every history fetch; the end is the current date at call
/// time.
pub const HISTORY_START: Date = date!(2015 - 01 - 01);

pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 10;

/// Days per horizon year. Fixed approximation, no leap-year adjustment.
const DAYS_PER_YEAR: u32 = 365;

/// Validated dashboard input: a catalog ticker plus a forecast horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    ticker: Ticker,
    horizon_years: u32,
}

impl UserSelection {
    pub fn new(ticker: Ticker, horizon_years: u32) -> Result<Self, ValidationError> {
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&horizon_years) {
            return Err(ValidationError::HorizonOutOfRange {
                value: horizon_years,
                min: MIN_HORIZON_YEARS,
                max: MAX_HORIZON_YEARS,
            });
        }

        if !ticker_catalog().iter().any(|entry| entry.ticker == ticker) {
            return Err(ValidationError::UnknownTicker {
                value: ticker.as_str().to_owned(),
            });
        }

        Ok(Self {
            ticker,
            horizon_years,
        })
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_years * DAYS_PER_YEAR
    }
}

/// Entry of the fixed ticker enumeration offered by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub ticker: Ticker,
    pub name: String,
}

/// The fixed ticker enumeration bound to the dashboard's select control.
pub fn ticker_catalog() -> Vec<CatalogEntry> {
    [
        ("GOOG", "Alphabet Inc."),
        ("AAPL", "Apple Inc."),
        ("MSFT", "Microsoft Corporation"),
        ("GME", "GameStop Corp."),
        ("GC=F", "Gold Futures"),
        ("BTC-USD", "Bitcoin USD"),
        ("^GSPC", "S&P 500 Index"),
        ("RELIANCE.NS", "Reliance Industries"),
    ]
    .into_iter()
    .map(|(ticker, name)| CatalogEntry {
        ticker: Ticker::parse(ticker).expect("catalog tickers are valid"),
        name: name.to_owned(),
    })
    .collect()
}
