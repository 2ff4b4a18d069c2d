//! Error types for stock data operations

use thiserror::Error;

/// Stock data specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// No API key was available for a provider that requires one
    #[error("{provider} API key is required to fetch {dataset}")]
    MissingCredential {
        provider: &'static str,
        dataset: &'static str,
    },

    /// Request to a provider failed (transport, HTTP status or undecodable body)
    #[error("Error fetching {dataset} from {provider}: {message}")]
    Fetch {
        provider: &'static str,
        dataset: &'static str,
        message: String,
    },

    /// Provider answered but had nothing for the request
    #[error("No {dataset} found for {symbol}. Check if the symbol is correct.")]
    NoData {
        dataset: &'static str,
        symbol: String,
    },

    /// Caller supplied a value outside the accepted set
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StockError {
    /// Build a `Fetch` error from any displayable cause
    pub fn fetch(
        provider: &'static str,
        dataset: &'static str,
        cause: impl std::fmt::Display,
    ) -> Self {
        Self::Fetch {
            provider,
            dataset,
            message: cause.to_string(),
        }
    }

    /// Build a `NoData` error
    pub fn no_data(dataset: &'static str, symbol: impl Into<String>) -> Self {
        Self::NoData {
            dataset,
            symbol: symbol.into(),
        }
    }

    /// Stable machine-readable discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "missing_credential",
            Self::Fetch { .. } => "fetch_error",
            Self::NoData { .. } => "no_data",
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::Config(_) => "config_error",
        }
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to toolkit_core::Error
impl From<StockError> for toolkit_core::Error {
    fn from(err: StockError) -> Self {
        toolkit_core::Error::failed(err.kind(), err.to_string())
    }
}
