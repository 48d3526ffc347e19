//! Raw IG wire-format structures and mapping into domain types.
//!
//! Kept separate from the domain types: these mirror IG's JSON exactly
//! (nested position/market pairs, string timestamps) and are flattened
//! into `dedup_core` snapshots at the boundary.

use crate::error::BrokerResult;
use dedup_core::{parse_ig_timestamp, ClosedTrade, Direction, MarketStatus, OpenPosition, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Login request body for `POST /session`.
#[derive(Debug, Serialize)]
pub struct SessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Response from `GET /positions`.
#[derive(Debug, Deserialize)]
pub struct PositionsResponse {
    pub positions: Vec<PositionEntry>,
}

/// One entry of the positions response: deal details plus the market
/// they belong to.
#[derive(Debug, Deserialize)]
pub struct PositionEntry {
    pub position: PositionDetail,
    pub market: MarketDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDetail {
    pub deal_id: String,
    pub direction: Direction,
    pub size: Size,
    #[serde(rename = "createdDateUTC")]
    pub created_date_utc: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDetail {
    pub instrument_name: String,
    pub market_status: MarketStatus,
}

impl PositionEntry {
    /// Flatten the nested wire entry into a domain snapshot.
    pub fn into_open_position(self) -> BrokerResult<OpenPosition> {
        let created_at = parse_ig_timestamp(&self.position.created_date_utc)?;
        Ok(OpenPosition {
            deal_id: self.position.deal_id.into(),
            instrument: self.market.instrument_name,
            direction: self.position.direction,
            size: self.position.size,
            created_at,
            market_status: self.market.market_status,
        })
    }
}

/// Response from `GET /markets/{epic}` (only the snapshot status matters).
#[derive(Debug, Deserialize)]
pub struct MarketResponse {
    pub snapshot: MarketSnapshotDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshotDetail {
    pub market_status: MarketStatus,
}

/// Response from `GET /history/transactions/{type}/{lastPeriod}`.
#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub instrument_name: String,
    pub open_date_utc: String,
}

impl TransactionsResponse {
    /// Group the history into closed trades per instrument.
    pub fn into_closed_trades(self) -> BrokerResult<HashMap<String, Vec<ClosedTrade>>> {
        let mut trades: HashMap<String, Vec<ClosedTrade>> = HashMap::new();
        for transaction in self.transactions {
            let opened_at = parse_ig_timestamp(&transaction.open_date_utc)?;
            trades
                .entry(transaction.instrument_name.clone())
                .or_default()
                .push(ClosedTrade {
                    instrument: transaction.instrument_name,
                    opened_at,
                });
        }
        Ok(trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_positions_response_deserializes() {
        let json = r#"{
            "positions": [
                {
                    "position": {
                        "dealId": "DIAAAABBCCDD123",
                        "direction": "BUY",
                        "size": 2.5,
                        "createdDateUTC": "2023-06-01T10:30:00",
                        "contractSize": 1,
                        "currency": "USD"
                    },
                    "market": {
                        "instrumentName": "EUR/USD",
                        "marketStatus": "TRADEABLE",
                        "epic": "CS.D.EURUSD.TODAY.IP"
                    }
                }
            ]
        }"#;

        let response: PositionsResponse = serde_json::from_str(json).unwrap();
        let position = response
            .positions
            .into_iter()
            .next()
            .unwrap()
            .into_open_position()
            .unwrap();

        assert_eq!(position.deal_id.as_str(), "DIAAAABBCCDD123");
        assert_eq!(position.instrument, "EUR/USD");
        assert_eq!(position.direction, Direction::Buy);
        assert_eq!(position.size, Size::new(dec!(2.5)));
        assert_eq!(
            position.created_at,
            Utc.with_ymd_and_hms(2023, 6, 1, 10, 30, 0).unwrap()
        );
        assert!(position.market_status.is_tradeable());
    }

    #[test]
    fn test_market_response_deserializes() {
        let json = r#"{"snapshot": {"marketStatus": "EDITS_ONLY", "bid": 15000.5}}"#;
        let response: MarketResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.snapshot.market_status, MarketStatus::EditsOnly);
    }

    #[test]
    fn test_transactions_group_by_instrument() {
        let json = r#"{
            "transactions": [
                {"instrumentName": "Gold", "openDateUtc": "2023-06-01T02:00:00"},
                {"instrumentName": "Gold", "openDateUtc": "2023-06-01T04:00:00"},
                {"instrumentName": "EUR/USD", "openDateUtc": "2023-06-01T03:00:00"}
            ]
        }"#;

        let response: TransactionsResponse = serde_json::from_str(json).unwrap();
        let trades = response.into_closed_trades().unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades["Gold"].len(), 2);
        assert_eq!(trades["EUR/USD"].len(), 1);
        assert_eq!(
            trades["Gold"][0].opened_at,
            Utc.with_ymd_and_hms(2023, 6, 1, 2, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let response = TransactionsResponse {
            transactions: vec![TransactionDetail {
                instrument_name: "Gold".to_string(),
                open_date_utc: "yesterday".to_string(),
            }],
        };
        assert!(response.into_closed_trades().is_err());
    }
}
