//! Conflict detector implementation.
//!
//! Two independent passes over the per-instrument groups, both using the
//! same symmetric time window:
//! - open-open: every unordered pair of open positions on an instrument
//! - open-closed: every open position against every recently closed trade
//!   on the same instrument, restricted to positions created after the
//!   closed trade was opened

use crate::config::DetectorConfig;
use crate::conflict::{ConflictReason, ConflictRecord, ConflictSet};
use dedup_core::{ClosedTrade, OpenPosition};
use std::collections::HashMap;
use tracing::debug;

/// Detects time-proximity conflicts between positions.
///
/// Pure and synchronous: operates over the immutable per-run snapshot,
/// produces records, touches nothing else. The pairwise scan is O(n²)
/// per instrument, which is fine for single-digit group sizes.
pub struct ConflictDetector {
    config: DetectorConfig,
}

impl ConflictDetector {
    /// Create a new detector with configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Run both detection passes.
    ///
    /// Instruments with no conflicts produce no entry in the output.
    pub fn detect(
        &self,
        groups: &HashMap<String, Vec<OpenPosition>>,
        closed_trades: &HashMap<String, Vec<ClosedTrade>>,
    ) -> HashMap<String, Vec<ConflictRecord>> {
        let mut sets: HashMap<String, ConflictSet> = HashMap::new();

        for (instrument, positions) in groups {
            let set = sets.entry(instrument.clone()).or_default();
            self.detect_open_open(instrument, positions, set);
        }

        for (instrument, trades) in closed_trades {
            let Some(positions) = groups.get(instrument) else {
                continue;
            };
            let set = sets.entry(instrument.clone()).or_default();
            self.detect_open_closed(instrument, positions, trades, set);
        }

        sets.into_iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(instrument, set)| (instrument, set.into_records()))
            .collect()
    }

    /// Open-open pass: flag every position involved in at least one
    /// within-window pair.
    fn detect_open_open(&self, instrument: &str, positions: &[OpenPosition], set: &mut ConflictSet) {
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if !self.within_window(&positions[i], &positions[j]) {
                    continue;
                }
                for position in [&positions[i], &positions[j]] {
                    if set.insert(position, ConflictReason::OpenOpenConflict) {
                        debug!(
                            instrument = %instrument,
                            deal_id = %position.deal_id,
                            created_at = %position.created_at,
                            "Open-open conflict recorded"
                        );
                    }
                }
            }
        }
    }

    /// Open-closed pass: flag every open position created within the
    /// window of (and, by default, strictly after) a closed trade's open.
    fn detect_open_closed(
        &self,
        instrument: &str,
        positions: &[OpenPosition],
        trades: &[ClosedTrade],
        set: &mut ConflictSet,
    ) {
        for position in positions {
            for trade in trades {
                let diff_ms = (position.created_at - trade.opened_at).num_milliseconds();
                if diff_ms.abs() > self.config.window_ms {
                    continue;
                }
                // A position that predates the closed trade is not a
                // fresh duplicate of it.
                if self.config.require_opened_after && diff_ms <= 0 {
                    continue;
                }
                if set.insert(position, ConflictReason::OpenClosedConflict) {
                    debug!(
                        instrument = %instrument,
                        deal_id = %position.deal_id,
                        closed_opened_at = %trade.opened_at,
                        "Open-closed conflict recorded"
                    );
                }
            }
        }
    }

    fn within_window(&self, a: &OpenPosition, b: &OpenPosition) -> bool {
        let diff_ms = (a.created_at - b.created_at).num_milliseconds().abs();
        diff_ms <= self.config.window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_instrument;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use dedup_core::{Direction, MarketStatus, Size};
    use rust_decimal_macros::dec;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
    }

    fn position(deal_id: &str, instrument: &str, hours: i64) -> OpenPosition {
        OpenPosition {
            deal_id: deal_id.into(),
            instrument: instrument.to_string(),
            direction: Direction::Buy,
            size: Size::new(dec!(1)),
            created_at: base_time() + Duration::hours(hours),
            market_status: MarketStatus::Tradeable,
        }
    }

    fn closed(instrument: &str, hours: i64) -> ClosedTrade {
        ClosedTrade {
            instrument: instrument.to_string(),
            opened_at: base_time() + Duration::hours(hours),
        }
    }

    fn detect(
        positions: Vec<OpenPosition>,
        trades: Vec<ClosedTrade>,
    ) -> HashMap<String, Vec<ConflictRecord>> {
        let groups = group_by_instrument(positions);
        let mut closed_trades: HashMap<String, Vec<ClosedTrade>> = HashMap::new();
        for trade in trades {
            closed_trades
                .entry(trade.instrument.clone())
                .or_default()
                .push(trade);
        }
        ConflictDetector::new(DetectorConfig::default()).detect(&groups, &closed_trades)
    }

    #[test]
    fn test_pair_within_window_flags_both() {
        let conflicts = detect(
            vec![position("A", "EUR/USD", 0), position("B", "EUR/USD", 5)],
            vec![],
        );

        let records = &conflicts["EUR/USD"];
        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .all(|r| r.reason == ConflictReason::OpenOpenConflict));
    }

    #[test]
    fn test_pair_outside_window_not_flagged() {
        let conflicts = detect(
            vec![position("A", "EUR/USD", 0), position("B", "EUR/USD", 25)],
            vec![],
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_exactly_24h_apart_is_a_conflict() {
        let conflicts = detect(
            vec![position("A", "EUR/USD", 0), position("B", "EUR/USD", 24)],
            vec![],
        );
        assert_eq!(conflicts["EUR/USD"].len(), 2);
    }

    #[test]
    fn test_bridging_position_merges_cluster() {
        // A (0h) and C (30h) are >24h apart, but B (20h) bridges both
        // pairs, so all three end up flagged.
        let conflicts = detect(
            vec![
                position("A", "EUR/USD", 0),
                position("B", "EUR/USD", 20),
                position("C", "EUR/USD", 30),
            ],
            vec![],
        );
        assert_eq!(conflicts["EUR/USD"].len(), 3);
    }

    #[test]
    fn test_no_duplicate_records_from_repeated_pairs() {
        // B pairs with both A and C; it must appear once.
        let conflicts = detect(
            vec![
                position("A", "EUR/USD", 0),
                position("B", "EUR/USD", 5),
                position("C", "EUR/USD", 10),
            ],
            vec![],
        );
        let b_count = conflicts["EUR/USD"]
            .iter()
            .filter(|r| r.position.deal_id == "B".into())
            .count();
        assert_eq!(b_count, 1);
    }

    #[test]
    fn test_instruments_do_not_cross_contaminate() {
        let conflicts = detect(
            vec![position("A", "EUR/USD", 0), position("B", "Gold", 5)],
            vec![],
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_closed_trade_conflict() {
        // Gold position at 10h, closed trade opened at 2h: diff 8h,
        // position after the trade -> conflict.
        let conflicts = detect(vec![position("C", "Gold", 10)], vec![closed("Gold", 2)]);

        let records = &conflicts["Gold"];
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reason, ConflictReason::OpenClosedConflict);
    }

    #[test]
    fn test_position_before_closed_trade_not_flagged() {
        // Position at 2h predates the closed trade opened at 10h; within
        // the window but not a fresh duplicate.
        let conflicts = detect(vec![position("C", "Gold", 2)], vec![closed("Gold", 10)]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_simultaneous_open_and_closed_not_flagged() {
        let conflicts = detect(vec![position("C", "Gold", 5)], vec![closed("Gold", 5)]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_directional_rule_can_be_disabled() {
        let groups = group_by_instrument(vec![position("C", "Gold", 2)]);
        let mut trades = HashMap::new();
        trades.insert("Gold".to_string(), vec![closed("Gold", 10)]);

        let config = DetectorConfig {
            require_opened_after: false,
            ..Default::default()
        };
        let conflicts = ConflictDetector::new(config).detect(&groups, &trades);
        assert_eq!(conflicts["Gold"].len(), 1);
    }

    #[test]
    fn test_closed_trades_without_open_positions_ignored() {
        let conflicts = detect(vec![], vec![closed("Gold", 2)]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_both_reasons_recorded_for_one_deal() {
        let conflicts = detect(
            vec![position("A", "Gold", 0), position("B", "Gold", 5)],
            vec![closed("Gold", 1)],
        );

        let records = &conflicts["Gold"];
        // A and B open-open; B also conflicts with the closed trade
        // (opened after it), A does not (it predates the trade).
        assert_eq!(records.len(), 3);
        let b_reasons: Vec<_> = records
            .iter()
            .filter(|r| r.position.deal_id == "B".into())
            .map(|r| r.reason)
            .collect();
        assert!(b_reasons.contains(&ConflictReason::OpenOpenConflict));
        assert!(b_reasons.contains(&ConflictReason::OpenClosedConflict));
    }
}
