mod forecast;
mod history;
mod serve;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use tickercast_core::{DataCache, ReqwestHttpClient, YahooAdapter};
use tickercast_forecast::SeasonalTrendEngine;
use tickercast_web::Controller;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.mock {
        info!("using deterministic synthetic data, no network calls");
    }
    let controller = build_controller(cli.mock);

    match &cli.command {
        Command::Serve(args) => serve::run(controller, args).await,
        Command::History(args) => {
            let value = history::run(&controller, args).await?;
            print_json(&value, cli.pretty)
        }
        Command::Forecast(args) => {
            let value = forecast::run(&controller, args).await?;
            print_json(&value, cli.pretty)
        }
    }
}

fn build_controller(mock: bool) -> Controller {
    let adapter = if mock {
        YahooAdapter::default()
    } else {
        YahooAdapter::with_http_client(Arc::new(ReqwestHttpClient::new()))
    };
    Controller::new(
        DataCache::new(Arc::new(adapter)),
        Arc::new(SeasonalTrendEngine::default()),
    )
}

fn print_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
