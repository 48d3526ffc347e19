//! IG REST API collaborators.
//!
//! Narrow contracts the core consumes:
//! - `login`: credentials -> session token pair (CST / X-SECURITY-TOKEN)
//! - `market_status`: tradeability of the configured reference market
//! - `open_positions`: current open-position snapshot
//! - `closed_trades`: recently closed trades grouped by instrument
//! - `close_position`: submit one closure order
//!
//! All transport errors surface as `BrokerError`; no retries here.

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod wire;

pub use client::IgClient;
pub use config::BrokerConfig;
pub use error::{BrokerError, BrokerResult};
pub use session::{Credentials, Session};
