//! Closure order building and batch execution.
//!
//! Turns the selector's closure list into broker-facing orders
//! (tradeable markets only, direction inverted, market/fill-or-kill)
//! and submits them one at a time, deferring failures to a single
//! end-of-batch aggregate error.

pub mod builder;
pub mod closer;
pub mod error;
pub mod executor;
pub mod rest_closer;

pub use builder::build_closure_orders;
pub use closer::{BoxFuture, DynPositionCloser, MockPositionCloser, PositionCloser};
pub use error::{ExecutorError, ExecutorResult};
pub use executor::ClosureExecutor;
pub use rest_closer::RestPositionCloser;
