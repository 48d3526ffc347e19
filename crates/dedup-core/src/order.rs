//! Order-related types and identifiers.
//!
//! Provides deal direction, order type, time-in-force, and deal ID types
//! matching IG's REST API vocabulary.

use crate::Size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deal direction: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Returns the opposite direction (the direction that closes a deal).
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order (our only order type for closures).
    Market,
    /// Limit order.
    Limit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Time-in-force for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Execute fully and immediately, or not at all.
    #[default]
    FillOrKill,
    /// Execute what is possible immediately, cancel the rest.
    ExecuteAndEliminate,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FillOrKill => write!(f, "FILL_OR_KILL"),
            Self::ExecuteAndEliminate => write!(f, "EXECUTE_AND_ELIMINATE"),
        }
    }
}

/// IG deal identifier.
///
/// Uniquely identifies an open deal on the account. Used as the
/// deduplication key when recording conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(String);

impl DealId {
    /// Create from an existing string (for parsing responses).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DealId {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl From<&str> for DealId {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl AsRef<str> for DealId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Broker-facing closure instruction for a single deal.
///
/// Serializes to the exact payload IG expects at `POST /positions/otc`
/// (with the `_method: DELETE` convention). The unused fields must be
/// present as explicit nulls, so none of them are skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureOrder {
    /// Deal to close.
    pub deal_id: DealId,
    /// Not used when closing by deal ID.
    pub epic: Option<String>,
    /// Not used when closing by deal ID.
    pub expiry: Option<String>,
    /// Opposite of the open position's direction.
    pub direction: Direction,
    /// Size as a string, exactly as IG expects it.
    pub size: String,
    /// Not used for market orders.
    pub level: Option<String>,
    /// Always `MARKET` for closures.
    pub order_type: OrderType,
    /// Always `FILL_OR_KILL`: close the full exposure now or not at all.
    pub time_in_force: TimeInForce,
    /// Not used for market orders.
    pub quote_id: Option<String>,
}

impl ClosureOrder {
    /// Build a market fill-or-kill closure for the given deal.
    pub fn market_close(deal_id: DealId, direction: Direction, size: Size) -> Self {
        Self {
            deal_id,
            epic: None,
            expiry: None,
            direction,
            size: size.to_string(),
            level: None,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::FillOrKill,
            quote_id: None,
        }
    }
}
