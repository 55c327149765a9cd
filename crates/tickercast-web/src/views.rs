//! View builders: pure projections from domain data to chart/table payloads.
//!
//! Nothing here transforms values; the structs serialize straight into the
//! JSON the client-side charting library consumes.

use serde::Serialize;
use time::Date;

use tickercast_core::{PriceRecord, PriceSeries};
use tickercast_forecast::{ComponentsBreakdown, ForecastPoint, ForecastResult};

/// Rows shown in every table preview.
pub const PREVIEW_ROWS: usize = 5;

/// Role of a band trace within an uncertainty envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandRole {
    Lower,
    Upper,
}

/// One line on a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<Date>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<BandRole>,
}

impl Trace {
    fn line(name: impl Into<String>, x: Vec<Date>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            band: None,
        }
    }

    fn band(name: impl Into<String>, x: Vec<Date>, y: Vec<f64>, role: BandRole) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            band: Some(role),
        }
    }
}

/// A renderable chart: title, traces, and whether the x-axis carries a
/// range slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_rangeslider: bool,
    pub traces: Vec<Trace>,
}

/// The raw-series view: table tail plus the open/close overlay chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSeriesPanel {
    pub preview: Vec<PriceRecord>,
    pub chart: ChartSpec,
}

/// Decomposed-components chart: one panel per component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentsChart {
    pub trend: Trace,
    pub weekly: Trace,
    pub yearly: Trace,
}

/// The forecast view: table tail, horizon label, banded forecast chart, and
/// the components breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPanel {
    pub preview: Vec<ForecastPoint>,
    pub horizon_label: String,
    pub chart: ChartSpec,
    pub components: ComponentsChart,
}

/// Project a loaded series into its panel. Caller guarantees the series is
/// non-empty (the controller never routes an empty load here).
pub fn raw_series_panel(series: &PriceSeries) -> RawSeriesPanel {
    let dates: Vec<Date> = series.records().iter().map(|r| r.date).collect();
    let opens: Vec<f64> = series.records().iter().map(|r| r.open).collect();
    let closes: Vec<f64> = series.records().iter().map(|r| r.close).collect();

    RawSeriesPanel {
        preview: series.tail(PREVIEW_ROWS).to_vec(),
        chart: ChartSpec {
            title: String::from("Stock Price Over Time"),
            x_rangeslider: true,
            traces: vec![
                Trace::line("Stock Open", dates.clone(), opens),
                Trace::line("Stock Close", dates, closes),
            ],
        },
    }
}

/// Project a forecast and its decomposition into the forecast panel.
pub fn forecast_panel(
    forecast: &ForecastResult,
    components: &ComponentsBreakdown,
    horizon_years: u32,
) -> ForecastPanel {
    let dates: Vec<Date> = forecast.points().iter().map(|p| p.ds).collect();
    let yhat: Vec<f64> = forecast.points().iter().map(|p| p.yhat).collect();
    let lower: Vec<f64> = forecast.points().iter().map(|p| p.yhat_lower).collect();
    let upper: Vec<f64> = forecast.points().iter().map(|p| p.yhat_upper).collect();

    let component_dates: Vec<Date> = components.rows.iter().map(|r| r.ds).collect();
    let trend: Vec<f64> = components.rows.iter().map(|r| r.trend).collect();
    let weekly: Vec<f64> = components.rows.iter().map(|r| r.weekly).collect();
    let yearly: Vec<f64> = components.rows.iter().map(|r| r.yearly).collect();

    ForecastPanel {
        preview: forecast.tail(PREVIEW_ROWS).to_vec(),
        horizon_label: format!("Forecast for {horizon_years} years"),
        chart: ChartSpec {
            title: String::from("Price Forecast"),
            x_rangeslider: true,
            traces: vec![
                Trace::band("Lower Bound", dates.clone(), lower, BandRole::Lower),
                Trace::band("Upper Bound", dates.clone(), upper, BandRole::Upper),
                Trace::line("Forecast", dates, yhat),
            ],
        },
        components: ComponentsChart {
            trend: Trace::line("Trend", component_dates.clone(), trend),
            weekly: Trace::line("Weekly", component_dates.clone(), weekly),
            yearly: Trace::line("Yearly", component_dates, yearly),
        },
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use tickercast_core::Ticker;
    use tickercast_forecast::{ComponentRow, ForecastPoint};

    use super::*;

    fn series(days: usize) -> PriceSeries {
        let ticker = Ticker::parse("AAPL").expect("valid ticker");
        let mut date = date!(2024 - 01 - 01);
        let mut records = Vec::new();
        for i in 0..days {
            let base = 100.0 + i as f64;
            records.push(
                PriceRecord::new(date, base, base + 1.0, base - 1.0, base + 0.5, 1_000)
                    .expect("test record is valid"),
            );
            date = date.next_day().expect("test dates stay in range");
        }
        PriceSeries::new(ticker, records).expect("ordered series")
    }

    #[test]
    fn raw_panel_previews_last_five_rows() {
        let panel = raw_series_panel(&series(8));

        assert_eq!(panel.preview.len(), 5);
        assert_eq!(panel.preview[4].date, date!(2024 - 01 - 08));
        assert!(panel.chart.x_rangeslider);
        assert_eq!(panel.chart.traces.len(), 2);
        assert_eq!(panel.chart.traces[0].name, "Stock Open");
        assert_eq!(panel.chart.traces[0].x.len(), 8);
    }

    #[test]
    fn raw_panel_is_a_pure_projection() {
        let input = series(6);
        let panel = raw_series_panel(&input);

        let opens: Vec<f64> = input.records().iter().map(|r| r.open).collect();
        assert_eq!(panel.chart.traces[0].y, opens);
    }

    #[test]
    fn forecast_panel_labels_the_horizon_and_bands() {
        let points: Vec<ForecastPoint> = (0..7)
            .map(|i| {
                let ds = date!(2024 - 01 - 01)
                    .checked_add(time::Duration::days(i))
                    .expect("in range");
                ForecastPoint {
                    ds,
                    yhat: 100.0 + i as f64,
                    yhat_lower: 98.0 + i as f64,
                    yhat_upper: 102.0 + i as f64,
                }
            })
            .collect();
        let forecast = ForecastResult::new(points.clone());
        let components = ComponentsBreakdown {
            rows: points
                .iter()
                .map(|p| ComponentRow {
                    ds: p.ds,
                    trend: p.yhat,
                    weekly: 0.0,
                    yearly: 0.0,
                })
                .collect(),
        };

        let panel = forecast_panel(&forecast, &components, 3);

        assert_eq!(panel.horizon_label, "Forecast for 3 years");
        assert_eq!(panel.preview.len(), 5);
        assert_eq!(panel.chart.traces.len(), 3);
        assert_eq!(panel.chart.traces[0].band, Some(BandRole::Lower));
        assert_eq!(panel.chart.traces[1].band, Some(BandRole::Upper));
        assert_eq!(panel.components.trend.y.len(), 7);
    }
}
