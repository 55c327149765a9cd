//! CLI argument definitions for tickercast.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the dashboard web server |
//! | `history` | Fetch and print the raw price history for a ticker |
//! | `forecast` | Fit the model and print the forecast for a ticker |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--mock` | `false` | Use deterministic synthetic data instead of the live API |
//! | `--pretty` | `false` | Pretty-print JSON output |

use clap::{Args, Parser, Subcommand};

/// Stock-forecast dashboard: fixed-epoch price history in, banded
/// multi-year forecasts out.
#[derive(Debug, Parser)]
#[command(
    name = "tickercast",
    author,
    version,
    about = "Stock price forecast dashboard"
)]
pub struct Cli {
    /// Use deterministic synthetic data instead of the live API.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 🌐 Run the dashboard web server.
    ///
    /// # Examples
    ///
    ///   tickercast serve
    ///   tickercast serve --port 3000 --mock
    Serve(ServeArgs),

    /// 📊 Fetch and print the raw price history for a catalog ticker.
    ///
    /// # Examples
    ///
    ///   tickercast history AAPL
    ///   tickercast history BTC-USD --pretty
    History(HistoryArgs),

    /// 📈 Fit the model and print the forecast for a catalog ticker.
    ///
    /// # Examples
    ///
    ///   tickercast forecast AAPL
    ///   tickercast forecast GOOG --years 3 --pretty
    Forecast(ForecastArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Catalog ticker, e.g. AAPL or ^GSPC.
    pub ticker: String,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Catalog ticker, e.g. AAPL or ^GSPC.
    pub ticker: String,

    /// Forecast horizon in years (1-10).
    #[arg(long, default_value_t = 1)]
    pub years: u32,
}
