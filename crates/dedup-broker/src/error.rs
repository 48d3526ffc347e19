//! Broker error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Unexpected response: HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Core error: {0}")]
    Core(#[from] dedup_core::CoreError),
}

pub type BrokerResult<T> = Result<T, BrokerError>;
