//! Duplicate-position closer for IG accounts.
//!
//! One stateless run per invocation: authenticate, gate on the
//! reference market's status, snapshot open positions and recent closed
//! trades, detect 24-hour-proximity conflicts, and close the redundant
//! positions. Scheduling is the host's responsibility.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
