//! Executor error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Closure submission failed: {0}")]
    Submission(String),

    #[error("{} closure order(s) failed: {}", .failures.len(), .failures.join("; "))]
    Batch { failures: Vec<String> },
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;
