use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickercast_core::ValidationError),

    #[error("failed to load data: {0}")]
    Fetch(#[from] tickercast_core::DataFetchError),

    #[error(transparent)]
    Forecast(#[from] tickercast_forecast::ForecastError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("invalid bind address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Fetch(_) => 3,
            Self::Forecast(_) => 6,
            Self::Serialization(_) => 4,
            Self::BindAddr(_) => 2,
            Self::Io(_) => 10,
        }
    }
}
