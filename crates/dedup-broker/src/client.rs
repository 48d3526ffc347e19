//! HTTP client for the IG dealing REST API.
//!
//! One client per run. Every call is awaited sequentially by the caller;
//! no retries, no shared state beyond the connection pool.

use crate::config::BrokerConfig;
use crate::error::{BrokerError, BrokerResult};
use crate::session::{Credentials, Session};
use crate::wire::{MarketResponse, PositionsResponse, SessionRequest, TransactionsResponse};
use dedup_core::{ClosedTrade, ClosureOrder, MarketStatus, OpenPosition};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Transaction type filter for the history endpoint.
const HISTORY_TRANSACTION_TYPE: &str = "ALL_DEAL";

/// Client for the IG dealing gateway.
pub struct IgClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl IgClient {
    /// Create a new client for the configured account type.
    pub fn new(config: &BrokerConfig, api_key: impl Into<String>) -> BrokerResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrokerError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            api_key: api_key.into(),
        })
    }

    /// Authenticate and obtain the session token pair.
    ///
    /// IG returns the tokens as the `CST` and `X-SECURITY-TOKEN` response
    /// headers of `POST /session`. Failure here is fatal to the run.
    pub async fn login(&self, credentials: &Credentials) -> BrokerResult<Session> {
        info!(base_url = %self.base_url, "Logging in to IG");

        let request = SessionRequest {
            identifier: &credentials.username,
            password: &credentials.password,
        };

        let response = self
            .http
            .post(format!("{}/session", self.base_url))
            .header("X-IG-API-KEY", &self.api_key)
            .header("Version", "2")
            .json(&request)
            .send()
            .await
            .map_err(|e| BrokerError::HttpClient(format!("Login request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerError::Auth(format!("HTTP {status}: {body}")));
        }

        let session = Session {
            cst: header_value(response.headers(), "CST")?,
            security_token: header_value(response.headers(), "X-SECURITY-TOKEN")?,
        };

        info!("IG session established");
        Ok(session)
    }

    /// Fetch the market status of the reference epic.
    pub async fn market_status(
        &self,
        session: &Session,
        epic: &str,
    ) -> BrokerResult<MarketStatus> {
        debug!(epic = %epic, "Fetching market status");

        let response = self
            .authed(
                self.http
                    .get(format!("{}/markets/{}", self.base_url, epic)),
                session,
                "3",
            )
            .send()
            .await
            .map_err(|e| BrokerError::HttpClient(format!("Market status request failed: {e}")))?;

        let market: MarketResponse = parse_success(response).await?;
        info!(epic = %epic, status = %market.snapshot.market_status, "Market status fetched");
        Ok(market.snapshot.market_status)
    }

    /// Fetch the current open-position snapshot, flattened to domain types.
    pub async fn open_positions(&self, session: &Session) -> BrokerResult<Vec<OpenPosition>> {
        debug!("Fetching open positions");

        let response = self
            .authed(
                self.http.get(format!("{}/positions", self.base_url)),
                session,
                "2",
            )
            .send()
            .await
            .map_err(|e| BrokerError::HttpClient(format!("Positions request failed: {e}")))?;

        let positions: PositionsResponse = parse_success(response).await?;
        let positions = positions
            .positions
            .into_iter()
            .map(|entry| entry.into_open_position())
            .collect::<BrokerResult<Vec<_>>>()?;

        info!(count = positions.len(), "Open positions fetched");
        Ok(positions)
    }

    /// Fetch closed trades for the lookback window, grouped by instrument.
    pub async fn closed_trades(
        &self,
        session: &Session,
        lookback_days: u32,
    ) -> BrokerResult<HashMap<String, Vec<ClosedTrade>>> {
        debug!(lookback_days, "Fetching closed trades");

        let url = format!(
            "{}/history/transactions/{}/{}",
            self.base_url, HISTORY_TRANSACTION_TYPE, lookback_days
        );
        let response = self
            .authed(self.http.get(url), session, "1")
            .send()
            .await
            .map_err(|e| BrokerError::HttpClient(format!("History request failed: {e}")))?;

        let transactions: TransactionsResponse = parse_success(response).await?;
        let trades = transactions.into_closed_trades()?;

        info!(
            instruments = trades.len(),
            trades = trades.values().map(Vec::len).sum::<usize>(),
            "Closed trades fetched"
        );
        Ok(trades)
    }

    /// Submit one closure order.
    ///
    /// IG closes positions through `POST /positions/otc` with the
    /// `_method: DELETE` override header. Non-success responses carry
    /// the status and body back to the caller; the executor decides how
    /// failures aggregate.
    pub async fn close_position(
        &self,
        session: &Session,
        order: &ClosureOrder,
    ) -> BrokerResult<()> {
        debug!(deal_id = %order.deal_id, direction = %order.direction, "Submitting closure order");

        let response = self
            .authed(
                self.http.post(format!("{}/positions/otc", self.base_url)),
                session,
                "1",
            )
            .header("_method", "DELETE")
            .json(order)
            .send()
            .await
            .map_err(|e| BrokerError::HttpClient(format!("Close request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!(deal_id = %order.deal_id, "Position closed");
        Ok(())
    }

    /// Attach the API key, session tokens, and endpoint version.
    fn authed(&self, builder: RequestBuilder, session: &Session, version: &str) -> RequestBuilder {
        builder
            .header("X-IG-API-KEY", &self.api_key)
            .header("CST", &session.cst)
            .header("X-SECURITY-TOKEN", &session.security_token)
            .header("Version", version)
    }
}

/// Extract a required response header as a string.
fn header_value(headers: &HeaderMap, name: &str) -> BrokerResult<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| BrokerError::Auth(format!("Response is missing the {name} header")))
}

/// Check the status and deserialize the body.
async fn parse_success<T: serde::de::DeserializeOwned>(response: Response) -> BrokerResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BrokerError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .await
        .map_err(|e| BrokerError::HttpClient(format!("Failed to parse response: {e}")))
}
