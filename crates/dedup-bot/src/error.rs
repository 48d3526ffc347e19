//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Broker error: {0}")]
    Broker(#[from] dedup_broker::BrokerError),

    #[error("Detector error: {0}")]
    Detector(#[from] dedup_detector::DetectorError),

    #[error("Executor error: {0}")]
    Executor(#[from] dedup_executor::ExecutorError),
}

pub type AppResult<T> = Result<T, AppError>;
