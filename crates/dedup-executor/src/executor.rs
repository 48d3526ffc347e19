//! Sequential closure batch execution.

use crate::closer::DynPositionCloser;
use crate::error::{ExecutorError, ExecutorResult};
use dedup_core::ClosureOrder;
use tracing::{info, warn};

/// Executes a batch of closure orders, one at a time, in list order.
///
/// Failures are per-order and non-fatal to the batch: every order is
/// attempted, failures are collected, and a single aggregate error
/// naming each failed deal is returned after the loop completes.
pub struct ClosureExecutor {
    closer: DynPositionCloser,
}

impl ClosureExecutor {
    /// Create a new executor over a position closer.
    pub fn new(closer: DynPositionCloser) -> Self {
        Self { closer }
    }

    /// Submit every order; defer failures to one aggregate error.
    pub async fn close_all(&self, orders: &[ClosureOrder]) -> ExecutorResult<()> {
        let mut failures = Vec::new();

        for order in orders {
            match self.closer.close(order).await {
                Ok(()) => {
                    info!(deal_id = %order.deal_id, direction = %order.direction, "Closure submitted");
                }
                Err(e) => {
                    warn!(deal_id = %order.deal_id, error = %e, "Closure failed");
                    failures.push(format!("{}: {e}", order.deal_id));
                }
            }
        }

        info!(
            attempted = orders.len(),
            failed = failures.len(),
            "Closure batch finished"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ExecutorError::Batch { failures })
        }
    }
}
