//! Real position closer over the IG REST client.

use std::sync::Arc;

use crate::closer::{BoxFuture, PositionCloser};
use crate::error::{ExecutorError, ExecutorResult};
use dedup_broker::{IgClient, Session};
use dedup_core::ClosureOrder;

/// Submits closure orders through the IG dealing gateway.
pub struct RestPositionCloser {
    client: Arc<IgClient>,
    session: Session,
}

impl RestPositionCloser {
    /// Create a closer bound to an authenticated session.
    pub fn new(client: Arc<IgClient>, session: Session) -> Self {
        Self { client, session }
    }
}

impl PositionCloser for RestPositionCloser {
    fn close<'a>(&'a self, order: &'a ClosureOrder) -> BoxFuture<'a, ExecutorResult<()>> {
        Box::pin(async move {
            self.client
                .close_position(&self.session, order)
                .await
                .map_err(|e| ExecutorError::Submission(e.to_string()))
        })
    }
}
