use thiserror::Error;

/// Validation and contract errors exposed by `tickercast-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter or '^': '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("ticker '{value}' is not in the supported catalog")]
    UnknownTicker { value: String },

    #[error("horizon must be between {min} and {max} years, got {value}")]
    HorizonOutOfRange { value: u32, min: u32, max: u32 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("record high must be >= low")]
    InvalidPriceRange,
    #[error("record open/close must be within high/low range")]
    InvalidPriceBounds,

    #[error("series dates must be strictly ascending (violated at position {position})")]
    UnorderedSeries { position: usize },

    #[error("date '{value}' is not a valid calendar date")]
    InvalidDate { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
