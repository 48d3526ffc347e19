//! Position closer trait for order submission.
//!
//! Trait-based abstraction over the broker's close-position call,
//! allowing dependency injection for testing and keeping the executor
//! loop independent of the HTTP transport.

use std::collections::HashSet;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{ExecutorError, ExecutorResult};
use dedup_core::ClosureOrder;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Trait for submitting closure orders to the broker.
pub trait PositionCloser: Send + Sync {
    /// Submit one closure order.
    fn close<'a>(&'a self, order: &'a ClosureOrder) -> BoxFuture<'a, ExecutorResult<()>>;
}

/// Arc wrapper for PositionCloser trait objects.
pub type DynPositionCloser = Arc<dyn PositionCloser>;

/// Mock closer for testing.
///
/// Records every submitted order and fails those whose deal ID has been
/// registered via `fail_deal`.
#[derive(Debug, Default)]
pub struct MockPositionCloser {
    closed: parking_lot::Mutex<Vec<ClosureOrder>>,
    fail_deals: parking_lot::Mutex<HashSet<String>>,
}

impl MockPositionCloser {
    /// Create a new mock closer that accepts every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make submissions for this deal ID fail.
    pub fn fail_deal(&self, deal_id: impl Into<String>) {
        self.fail_deals.lock().insert(deal_id.into());
    }

    /// Get every recorded submission, in submission order.
    pub fn submissions(&self) -> Vec<ClosureOrder> {
        self.closed.lock().clone()
    }
}

impl PositionCloser for MockPositionCloser {
    fn close<'a>(&'a self, order: &'a ClosureOrder) -> BoxFuture<'a, ExecutorResult<()>> {
        Box::pin(async move {
            self.closed.lock().push(order.clone());
            if self.fail_deals.lock().contains(order.deal_id.as_str()) {
                return Err(ExecutorError::Submission(format!(
                    "broker rejected {}",
                    order.deal_id
                )));
            }
            Ok(())
        })
    }
}
