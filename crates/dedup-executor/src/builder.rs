//! Closure order construction.

use dedup_core::ClosureOrder;
use dedup_detector::ConflictRecord;
use std::collections::HashSet;
use tracing::debug;

/// Build broker-facing closure orders from the slated conflict records.
///
/// Positions whose market is not currently tradeable are silently
/// skipped (logged at debug): a closed or suspended market is an
/// expected condition, not an error. A deal slated under more than one
/// reason produces a single order — closing a deal twice would only
/// bounce off the broker.
///
/// Each order inverts the position's direction and carries its size
/// verbatim as a string, with MARKET / FILL_OR_KILL semantics: eliminate
/// the duplicate exposure fully and immediately, or not at all.
pub fn build_closure_orders(records: &[ConflictRecord]) -> Vec<ClosureOrder> {
    let mut seen = HashSet::new();
    let mut orders = Vec::new();

    for record in records {
        let position = &record.position;
        if !position.market_status.is_tradeable() {
            debug!(
                deal_id = %position.deal_id,
                instrument = %position.instrument,
                status = %position.market_status,
                "Market not tradeable, skipping closure"
            );
            continue;
        }
        if !seen.insert(position.deal_id.clone()) {
            continue;
        }
        orders.push(ClosureOrder::market_close(
            position.deal_id.clone(),
            position.direction.opposite(),
            position.size,
        ));
    }

    orders
}
