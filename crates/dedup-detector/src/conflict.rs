//! Conflict records and idempotent per-instrument conflict sets.

use dedup_core::{DealId, OpenPosition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Why a position was flagged as conflicting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    /// Opened within the window of another open position on the same instrument.
    OpenOpenConflict,
    /// Opened within the window after a recently closed trade on the same instrument.
    OpenClosedConflict,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenOpenConflict => write!(f, "OPEN_OPEN_CONFLICT"),
            Self::OpenClosedConflict => write!(f, "OPEN_CLOSED_CONFLICT"),
        }
    }
}

/// A position flagged for potential closure, with the reason it was flagged.
///
/// Transient: produced by the detector, consumed by the selector within
/// a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictRecord {
    pub position: OpenPosition,
    pub reason: ConflictReason,
}

/// Per-instrument conflict set with idempotent insertion.
///
/// A deal ID appears at most once per reason: repeated pair membership
/// during the pairwise scan must not produce duplicate records.
#[derive(Debug, Default)]
pub struct ConflictSet {
    records: Vec<ConflictRecord>,
    seen: HashSet<(DealId, ConflictReason)>,
}

impl ConflictSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a conflict unless this (deal, reason) pair is already present.
    ///
    /// Returns true if the record was inserted.
    pub fn insert(&mut self, position: &OpenPosition, reason: ConflictReason) -> bool {
        if !self.seen.insert((position.deal_id.clone(), reason)) {
            return false;
        }
        self.records.push(ConflictRecord {
            position: position.clone(),
            reason,
        });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Consume the set, yielding records in insertion order.
    pub fn into_records(self) -> Vec<ConflictRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dedup_core::{Direction, MarketStatus, Size};
    use rust_decimal_macros::dec;

    fn position(deal_id: &str) -> OpenPosition {
        OpenPosition {
            deal_id: deal_id.into(),
            instrument: "Gold".to_string(),
            direction: Direction::Buy,
            size: Size::new(dec!(1)),
            created_at: Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap(),
            market_status: MarketStatus::Tradeable,
        }
    }

    #[test]
    fn test_insert_is_idempotent_per_reason() {
        let mut set = ConflictSet::new();
        let p = position("D1");

        assert!(set.insert(&p, ConflictReason::OpenOpenConflict));
        assert!(!set.insert(&p, ConflictReason::OpenOpenConflict));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_deal_distinct_reasons_both_recorded() {
        let mut set = ConflictSet::new();
        let p = position("D1");

        assert!(set.insert(&p, ConflictReason::OpenOpenConflict));
        assert!(set.insert(&p, ConflictReason::OpenClosedConflict));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_into_records_preserves_insertion_order() {
        let mut set = ConflictSet::new();
        set.insert(&position("D1"), ConflictReason::OpenOpenConflict);
        set.insert(&position("D2"), ConflictReason::OpenOpenConflict);

        let records = set.into_records();
        assert_eq!(records[0].position.deal_id, "D1".into());
        assert_eq!(records[1].position.deal_id, "D2".into());
    }
}
