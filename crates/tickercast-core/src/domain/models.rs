use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Ticker, ValidationError};

/// Daily OHLC record produced by a data source. Immutable once fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceRecord {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidPriceRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidPriceBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Ordered record sequence for one ticker.
///
/// Invariant: dates are strictly ascending, so duplicates are impossible.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: Ticker,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker, records: Vec<PriceRecord>) -> Result<Self, ValidationError> {
        for (position, pair) in records.windows(2).enumerate() {
            if pair[0].date >= pair[1].date {
                return Err(ValidationError::UnorderedSeries {
                    position: position + 1,
                });
            }
        }

        Ok(Self { ticker, records })
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Last `n` records, in order. Fewer if the series is shorter.
    pub fn tail(&self, n: usize) -> &[PriceRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn first_date(&self) -> Option<Date> {
        self.records.first().map(|record| record.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.records.last().map(|record| record.date)
    }

    /// The `(date, close)` projection handed to the forecasting engine.
    pub fn close_points(&self) -> Vec<(Date, f64)> {
        self.records
            .iter()
            .map(|record| (record.date, record.close))
            .collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn record(d: Date, close: f64) -> PriceRecord {
        PriceRecord::new(d, close - 0.3, close + 1.0, close - 1.0, close, 1_000)
            .expect("test record is valid")
    }

    #[test]
    fn rejects_invalid_price_bounds() {
        let err = PriceRecord::new(date!(2024 - 01 - 02), 10.0, 12.0, 9.0, 12.5, 10)
            .expect_err("close above high must fail");
        assert!(matches!(err, ValidationError::InvalidPriceBounds));
    }

    #[test]
    fn rejects_inverted_high_low() {
        let err = PriceRecord::new(date!(2024 - 01 - 02), 10.0, 9.0, 11.0, 10.0, 10)
            .expect_err("high < low must fail");
        assert!(matches!(err, ValidationError::InvalidPriceRange));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let ticker = Ticker::parse("AAPL").expect("valid ticker");
        let records = vec![record(date!(2024 - 01 - 02), 10.0), record(date!(2024 - 01 - 02), 11.0)];

        let err = PriceSeries::new(ticker, records).expect_err("duplicate date must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { position: 1 }));
    }

    #[test]
    fn tail_returns_last_records_in_order() {
        let ticker = Ticker::parse("AAPL").expect("valid ticker");
        let records = vec![
            record(date!(2024 - 01 - 02), 10.0),
            record(date!(2024 - 01 - 03), 11.0),
            record(date!(2024 - 01 - 04), 12.0),
        ];
        let series = PriceSeries::new(ticker, records).expect("ordered series");

        let tail = series.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].date, date!(2024 - 01 - 03));
        assert_eq!(tail[1].date, date!(2024 - 01 - 04));

        assert_eq!(series.tail(10).len(), 3);
    }

    #[test]
    fn close_points_project_date_and_close() {
        let ticker = Ticker::parse("MSFT").expect("valid ticker");
        let series = PriceSeries::new(
            ticker,
            vec![record(date!(2024 - 01 - 02), 10.0), record(date!(2024 - 01 - 03), 11.0)],
        )
        .expect("ordered series");

        let points = series.close_points();
        assert_eq!(points, vec![(date!(2024 - 01 - 02), 10.0), (date!(2024 - 01 - 03), 11.0)]);
    }
}
