/// Error types for Meeting Artifacts
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use crate::domain::models::FailureKind;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AppError {
    /// Network unreachable, non-2xx status or timeout
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx response whose body is malformed or lacks the expected fields
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Well-formed response explicitly reporting failure
    #[error("Processing service failure: {0}")]
    ServiceFailure(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Which bucket of the failure taxonomy this error belongs to.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AppError::Protocol(_) | AppError::Serialization(_) => FailureKind::Protocol,
            AppError::ServiceFailure(_) => FailureKind::ServiceFailure,
            AppError::Transport(_)
            | AppError::Http(_)
            | AppError::Io(_)
            | AppError::Config(_)
            | AppError::InvalidInput(_)
            | AppError::Other(_) => FailureKind::Transport,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
