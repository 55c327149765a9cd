use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, OffsetDateTime, Weekday};
use tracing::debug;

use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{PriceRecord, PriceSeries, Ticker, ValidationError};

const CHART_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo chart adapter supporting both real API calls and mock mode.
///
/// The default construction uses [`NoopHttpClient`] and serves a
/// deterministic synthetic series seeded from the ticker bytes, so tests
/// never touch the network.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
        }
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            debug!(ticker = %req.ticker, start = %req.start, end = %req.end, "fetching history");
            if self.use_real_api {
                self.fetch_real_history(&req).await
            } else {
                synthetic_history(&req)
            }
        })
    }
}

impl YahooAdapter {
    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
        let period1 = req.start.midnight().assume_utc().unix_timestamp();
        // period2 is exclusive upstream; push it one day past the range end.
        let period2 = req.end.midnight().assume_utc().unix_timestamp() + 86_400;

        let endpoint = format!(
            "{CHART_BASE}/{}?period1={period1}&period2={period2}&interval=1d",
            urlencoding::encode(req.ticker.as_str()),
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SourceError::unavailable(format!("yahoo transport error: {}", e.message())))?;

        if response.status == 429 {
            return Err(SourceError::rate_limited("yahoo returned status 429"));
        }
        if response.status == 404 {
            return Err(SourceError::no_data(format!(
                "yahoo has no chart data for '{}'",
                req.ticker
            )));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_response(&req.ticker, &response.body)
    }
}

fn parse_chart_response(ticker: &Ticker, body: &str) -> Result<PriceSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &chart_response.chart.error {
        if !error.is_empty() {
            return Err(SourceError::unavailable(format!("yahoo chart API error: {error}")));
        }
    }

    let result = chart_response
        .chart
        .result
        .first()
        .ok_or_else(|| SourceError::no_data("no chart data in response"))?;

    let timestamps = result
        .timestamp
        .as_deref()
        .ok_or_else(|| SourceError::no_data("no timestamp data"))?;
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| SourceError::no_data("no quote data"))?;

    let mut records: Vec<PriceRecord> = Vec::with_capacity(timestamps.len());
    for (i, &ts_value) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(ts_value)
            .map_err(|e| SourceError::internal(format!("invalid timestamp: {e}")))?
            .date();

        // The live partial bar can repeat the final trading day; keep the
        // first occurrence.
        if records.last().is_some_and(|last| last.date >= date) {
            continue;
        }

        // Only emit a record when all OHLC values are present.
        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) {
            let volume = quote
                .volume
                .get(i)
                .copied()
                .flatten()
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0);

            if let Ok(record) = PriceRecord::new(date, *open, *high, *low, *close, volume) {
                records.push(record);
            }
        }
    }

    PriceSeries::new(ticker.clone(), records).map_err(validation_to_error)
}

/// Deterministic weekday-only series for mock mode. Seeded from the ticker
/// bytes so every ticker gets a distinct but stable shape.
fn synthetic_history(req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
    let seed = ticker_seed(&req.ticker);
    let anchor = 90.0 + (seed % 350) as f64 / 10.0;

    let mut records = Vec::new();
    let mut date = req.start;
    let mut index: u64 = 0;

    while date <= req.end {
        if !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            let wobble = ((seed.wrapping_add(index * 7)) % 70) as f64 / 10.0;
            let base = anchor + 0.02 * index as f64 + wobble;

            let record = PriceRecord::new(
                date,
                base,
                base + 1.20,
                base - 0.80,
                base + 0.30,
                20_000 + index * 25,
            )
            .map_err(validation_to_error)?;
            records.push(record);
            index += 1;
        }

        date = match date.next_day() {
            Some(next) => next,
            None => break,
        };
    }

    PriceSeries::new(req.ticker.clone(), records).map_err(validation_to_error)
}

fn ticker_seed(ticker: &Ticker) -> u64 {
    ticker.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::internal(error.to_string())
}

// Yahoo chart API response structures.
#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Vec<YahooChartResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}
