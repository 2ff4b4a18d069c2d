//! Error types for tool execution

use serde_json::{Value, json};
use thiserror::Error;

/// Result type alias for tool execution
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool execution
#[derive(Error, Debug)]
pub enum Error {
    /// Tool input did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Tool ran but could not produce a result
    ///
    /// `kind` is a stable, machine-readable discriminator supplied by the
    /// domain error that caused the failure.
    #[error("{message}")]
    Failed {
        kind: &'static str,
        message: String,
    },
}

impl Error {
    /// Build a `Failed` error
    pub fn failed(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::Failed { kind, .. } => *kind,
        }
    }

    /// Error-shaped payload handed back to the calling framework
    pub fn to_payload(&self) -> Value {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameters("missing field `ticker`".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: missing field `ticker`");

        let err = Error::failed("no_data", "nothing here");
        assert_eq!(err.to_string(), "nothing here");
    }

    #[test]
    fn test_error_payload() {
        let payload = Error::failed("fetch_error", "connection refused").to_payload();
        assert_eq!(payload["error"], "connection refused");
        assert_eq!(payload["kind"], "fetch_error");

        let payload = Error::InvalidParameters("bad".to_string()).to_payload();
        assert_eq!(payload["kind"], "invalid_parameters");
    }
}
