//! End-to-end pipeline journeys through the controller.

use time::Duration;

use tickercast_core::{ticker_catalog, HISTORY_START};
use tickercast_forecast::SeasonalTrendEngine;
use tickercast_tests::*;
use tickercast_web::{Controller, PipelineState};

fn controller_with(source: Arc<dyn DataSource>) -> Controller {
    Controller::new(DataCache::new(source), Arc::new(SeasonalTrendEngine::default()))
}

#[tokio::test]
async fn every_catalog_ticker_fits_at_both_horizon_extremes() {
    let controller = controller_with(Arc::new(YahooAdapter::default()));

    for entry in ticker_catalog() {
        for years in [1_u32, 10] {
            let selection = UserSelection::new(entry.ticker.clone(), years)
                .expect("catalog selection is valid");
            let data = controller
                .run(&selection)
                .await
                .expect("pipeline succeeds");

            assert_eq!(data.state, PipelineState::Fitted, "ticker {}", entry.ticker);
            let raw = data.raw.expect("raw panel present");
            let forecast = data.forecast.expect("forecast panel present");
            assert_eq!(raw.preview.len(), 5);
            assert_eq!(forecast.preview.len(), 5);
            assert_eq!(forecast.horizon_label, format!("Forecast for {years} years"));
        }
    }
}

#[tokio::test]
async fn forecast_length_matches_history_plus_horizon() {
    let controller = controller_with(Arc::new(YahooAdapter::default()));
    let selection = selection("MSFT", 2);

    let data = controller.run(&selection).await.expect("pipeline succeeds");
    let history_len = controller
        .cache()
        .get_or_fetch(selection.ticker())
        .await
        .expect("series is cached")
        .len();

    let forecast = data.forecast.expect("forecast panel present");
    let chart_points = forecast.chart.traces.last().expect("forecast trace").x.len();
    assert_eq!(chart_points, history_len + 730);
}

#[tokio::test]
async fn one_year_selection_spans_the_fixed_epoch_through_the_horizon() {
    let controller = controller_with(Arc::new(YahooAdapter::default()));
    let selection = selection("AAPL", 1);

    let data = controller.run(&selection).await.expect("pipeline succeeds");
    let series = controller
        .cache()
        .get_or_fetch(selection.ticker())
        .await
        .expect("series is cached");

    // History always starts at the fixed epoch (a Thursday, so the
    // weekday-only series opens on it exactly).
    assert_eq!(series.first_date(), Some(HISTORY_START));

    // The forecast trace extends exactly 365 days past the last observation.
    let last_observed = series.last_date().expect("series is non-empty");
    let forecast = data.forecast.expect("forecast panel present");
    let trace = forecast.chart.traces.last().expect("forecast trace");
    assert_eq!(
        trace.x.last().copied(),
        Some(last_observed + Duration::days(365))
    );
}

#[tokio::test]
async fn fetch_failure_ends_in_a_banner_not_an_error() {
    let controller = controller_with(Arc::new(FailingSource));

    let data = controller
        .run(&selection("AAPL", 1))
        .await
        .expect("load failures are recovered");

    assert_eq!(data.state, PipelineState::LoadFailed);
    assert_eq!(
        data.transitions,
        vec![
            PipelineState::Idle,
            PipelineState::Loading,
            PipelineState::LoadFailed,
        ]
    );
    assert!(data.error.expect("banner text present").contains("upstream timed out"));
    assert!(data.raw.is_none());
    assert!(data.forecast.is_none());
}

#[tokio::test]
async fn empty_history_is_a_load_failure() {
    let controller = controller_with(Arc::new(EmptySource));

    let data = controller
        .run(&selection("GME", 3))
        .await
        .expect("load failures are recovered");

    assert_eq!(data.state, PipelineState::LoadFailed);
    assert!(data.error.expect("banner text present").contains("no price data"));
}

#[tokio::test]
async fn repeat_interactions_reuse_the_cached_series() {
    let source = Arc::new(CountingSource::new());
    let controller = controller_with(source.clone());
    let selection = selection("GOOG", 1);

    controller.run(&selection).await.expect("first run succeeds");
    controller.run(&selection).await.expect("second run succeeds");

    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn dashboard_payload_serializes_for_the_api() {
    let controller = controller_with(Arc::new(YahooAdapter::default()));

    let data = controller
        .run(&selection("BTC-USD", 1))
        .await
        .expect("pipeline succeeds");
    let value = serde_json::to_value(&data).expect("payload serializes");

    assert_eq!(value["state"], "fitted");
    assert_eq!(value["ticker"], "BTC-USD");
    assert_eq!(
        value["transitions"],
        serde_json::json!(["idle", "loading", "loaded", "fitting", "fitted"])
    );
    assert_eq!(value["raw"]["chart"]["traces"][0]["name"], "Stock Open");
    assert_eq!(value["forecast"]["chart"]["traces"][0]["band"], "lower");
}
