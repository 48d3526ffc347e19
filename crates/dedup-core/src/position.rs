//! Open position and closed trade snapshots.
//!
//! These are immutable for the duration of one run: the system performs
//! no cross-run state, so every run starts from a fresh snapshot.

use crate::error::{CoreError, Result};
use crate::{DealId, Direction, Size};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market status as reported by IG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    /// Orders can be executed.
    Tradeable,
    /// Working orders can be edited but nothing can be dealt.
    EditsOnly,
    /// Market is closed.
    Closed,
    /// Market is offline.
    Offline,
    /// Market is in auction.
    OnAuction,
    /// Market is in auction with no edits allowed.
    OnAuctionNoEdits,
    /// Dealing is suspended.
    Suspended,
}

impl MarketStatus {
    /// Check if this status permits order execution.
    pub fn is_tradeable(&self) -> bool {
        matches!(self, Self::Tradeable)
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tradeable => write!(f, "TRADEABLE"),
            Self::EditsOnly => write!(f, "EDITS_ONLY"),
            Self::Closed => write!(f, "CLOSED"),
            Self::Offline => write!(f, "OFFLINE"),
            Self::OnAuction => write!(f, "ON_AUCTION"),
            Self::OnAuctionNoEdits => write!(f, "ON_AUCTION_NO_EDITS"),
            Self::Suspended => write!(f, "SUSPENDED"),
        }
    }
}

/// A currently held, not-yet-closed deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    /// Unique deal identifier.
    pub deal_id: DealId,
    /// Instrument name (e.g., "EUR/USD").
    pub instrument: String,
    /// Direction the deal was opened in.
    pub direction: Direction,
    /// Deal size.
    pub size: Size,
    /// When the deal was opened (UTC).
    pub created_at: DateTime<Utc>,
    /// Market status at snapshot time.
    pub market_status: MarketStatus,
}

/// Historical record of a trade that has already been closed.
///
/// Only the opening timestamp matters: an open position created too
/// close after it is considered stale duplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// Instrument name.
    pub instrument: String,
    /// When the now-closed trade was originally opened (UTC).
    pub opened_at: DateTime<Utc>,
}

/// Parse a timestamp string as IG renders them.
///
/// IG is inconsistent across API versions: v2 endpoints return
/// `2023-01-15T10:30:42` (naive, implicitly UTC), some return RFC 3339
/// with an offset, and v1 history endpoints use `2023/01/15 10:30:42`.
pub fn parse_ig_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(CoreError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_market_status_is_tradeable() {
        assert!(MarketStatus::Tradeable.is_tradeable());
        assert!(!MarketStatus::EditsOnly.is_tradeable());
        assert!(!MarketStatus::Closed.is_tradeable());
        assert!(!MarketStatus::Suspended.is_tradeable());
    }

    #[test]
    fn test_market_status_wire_format() {
        let parsed: MarketStatus = serde_json::from_str(r#""EDITS_ONLY""#).unwrap();
        assert_eq!(parsed, MarketStatus::EditsOnly);
        assert_eq!(parsed.to_string(), "EDITS_ONLY");
    }

    #[test]
    fn test_parse_naive_timestamp() {
        let dt = parse_ig_timestamp("2023-01-15T10:30:42").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 42).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let dt = parse_ig_timestamp("2023-01-15T10:30:42+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 1, 15, 8, 30, 42).unwrap());
    }

    #[test]
    fn test_parse_v1_history_timestamp() {
        let dt = parse_ig_timestamp("2023/01/15 10:30:42").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 42).unwrap());
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        assert!(parse_ig_timestamp("not a date").is_err());
    }
}
