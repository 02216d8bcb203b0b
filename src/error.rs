//! Error types for the insight engine
//!
//! The engine's calculators and detectors are total functions and do not
//! produce errors; fallible paths are limited to the live-update subsystem
//! (snapshot acquisition, polling) and serialization at the API boundary.

use thiserror::Error;

/// Comprehensive error type for the insight engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Snapshot source error: {0}")]
    SnapshotSource(String),

    #[error("Polling error: {0}")]
    Polling(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Async task error: {0}")]
    AsyncTask(#[from] tokio::task::JoinError),
}

impl EngineError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a snapshot source error
    pub fn snapshot_source<S: Into<String>>(msg: S) -> Self {
        Self::SnapshotSource(msg.into())
    }

    /// Create a polling error
    pub fn polling<S: Into<String>>(msg: S) -> Self {
        Self::Polling(msg.into())
    }
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_include_context() {
        let err = EngineError::snapshot_source("connection refused");
        assert_eq!(err.to_string(), "Snapshot source error: connection refused");

        let err = EngineError::configuration("interval must be non-zero");
        assert!(err.to_string().contains("interval must be non-zero"));
    }

    #[test]
    fn serde_errors_convert() {
        let parse_err = serde_json::from_str::<u32>("not-json").unwrap_err();
        let err: EngineError = parse_err.into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
