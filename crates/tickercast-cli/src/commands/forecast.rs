use serde_json::Value;

use tickercast_core::{DataFetchError, Ticker, UserSelection};
use tickercast_web::{Controller, PipelineState};

use crate::cli::ForecastArgs;
use crate::error::CliError;

pub async fn run(controller: &Controller, args: &ForecastArgs) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let selection = UserSelection::new(ticker, args.years)?;

    let data = controller.run(&selection).await?;
    if data.state == PipelineState::LoadFailed {
        return Err(CliError::Fetch(DataFetchError::Source {
            ticker: data.ticker,
            message: data.error.unwrap_or_else(|| String::from("unknown failure")),
        }));
    }

    Ok(serde_json::to_value(&data)?)
}
