//! Core domain types for the duplicate-position closer.
//!
//! This crate provides fundamental types used throughout the system:
//! - `DealId`: Unique identifier for an IG deal
//! - `Size`: Precision-safe position quantity
//! - `OpenPosition`, `ClosedTrade`: Immutable per-run snapshots
//! - `ClosureOrder`: Broker-facing close instruction
//! - `Direction`, `OrderType`, `TimeInForce`, `MarketStatus`: Trading enums

pub mod decimal;
pub mod error;
pub mod order;
pub mod position;

pub use decimal::Size;
pub use error::{CoreError, Result};
pub use order::{ClosureOrder, DealId, Direction, OrderType, TimeInForce};
pub use position::{parse_ig_timestamp, ClosedTrade, MarketStatus, OpenPosition};
