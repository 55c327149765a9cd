use serde_json::{json, Value};

use tickercast_core::Ticker;
use tickercast_web::{Controller, PREVIEW_ROWS};

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub async fn run(controller: &Controller, args: &HistoryArgs) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let series = controller.cache().get_or_fetch(&ticker).await?;

    // Same 5-row tail the dashboard table shows.
    Ok(json!({
        "ticker": series.ticker(),
        "records": series.len(),
        "preview": series.tail(PREVIEW_ROWS),
    }))
}
