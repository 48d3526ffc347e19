//! Main application orchestration.
//!
//! One run walks the whole pipeline:
//! login -> market-status gate -> snapshot fetch -> group -> detect ->
//! select -> build -> execute. Detection and selection are pure and
//! synchronous; only the broker calls suspend, one at a time.

use crate::config::AppConfig;
use crate::error::AppResult;
use dedup_broker::{Credentials, IgClient};
use dedup_core::MarketStatus;
use dedup_detector::{group_by_instrument, ClosureSelector, ConflictDetector};
use dedup_executor::{build_closure_orders, ClosureExecutor, RestPositionCloser};
use std::sync::Arc;
use tracing::info;

/// Main application.
pub struct Application {
    config: AppConfig,
    client: Arc<IgClient>,
    credentials: Credentials,
}

impl Application {
    /// Create a new application.
    ///
    /// Credentials come from the environment; a missing credential fails
    /// here, before any network traffic.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let credentials = Credentials::from_env()?;
        let client = Arc::new(IgClient::new(&config.broker, credentials.api_key.clone())?);

        Ok(Self {
            config,
            client,
            credentials,
        })
    }

    /// Execute one stateless run.
    pub async fn run(&self) -> AppResult<()> {
        let session = self.client.login(&self.credentials).await?;

        // The reference market in edits-only mode means nothing can be
        // dealt right now; skip the run entirely.
        let status = self
            .client
            .market_status(&session, &self.config.broker.status_epic)
            .await?;
        if status == MarketStatus::EditsOnly {
            info!(
                epic = %self.config.broker.status_epic,
                "Reference market is in edits-only mode, skipping run"
            );
            return Ok(());
        }

        let positions = self.client.open_positions(&session).await?;
        let closed_trades = self
            .client
            .closed_trades(&session, self.config.lookback_days)
            .await?;

        let groups = group_by_instrument(positions);
        let conflicts =
            ConflictDetector::new(self.config.detector.clone()).detect(&groups, &closed_trades);
        let slated = ClosureSelector::new(self.config.selector.clone()).select(conflicts);
        let orders = build_closure_orders(&slated);

        if orders.is_empty() {
            info!("No closure orders to submit");
            return Ok(());
        }

        info!(orders = orders.len(), "Submitting closure orders");
        let closer = Arc::new(RestPositionCloser::new(self.client.clone(), session));
        ClosureExecutor::new(closer).close_all(&orders).await?;

        Ok(())
    }
}
