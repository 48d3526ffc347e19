//! Conflict detection and closure selection for overlapping positions.
//!
//! Finds open positions opened within a time window of each other (or of
//! a recently closed trade on the same instrument) and decides which of
//! them must be closed: the earliest position in an open-open cluster
//! survives, everything else is slated for closure.

pub mod config;
pub mod conflict;
pub mod detector;
pub mod error;
pub mod group;
pub mod selector;

pub use config::{DetectorConfig, SelectorConfig, DEFAULT_WINDOW_MS};
pub use conflict::{ConflictReason, ConflictRecord, ConflictSet};
pub use detector::ConflictDetector;
pub use error::{DetectorError, DetectorResult};
pub use group::group_by_instrument;
pub use selector::ClosureSelector;
