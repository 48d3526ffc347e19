//! Per-run grouping of open positions by instrument.
//!
//! The grouping is a transient in-memory mapping built fresh each run,
//! never retained between runs.

use dedup_core::OpenPosition;
use std::collections::HashMap;

/// Group a flat list of open positions by instrument name.
///
/// The upstream feed may deliver positions already grouped or flat; the
/// broker layer always flattens, and this re-groups, so either shape
/// ends up here identically. An empty input yields an empty mapping.
pub fn group_by_instrument(positions: Vec<OpenPosition>) -> HashMap<String, Vec<OpenPosition>> {
    let mut groups: HashMap<String, Vec<OpenPosition>> = HashMap::new();
    for position in positions {
        groups
            .entry(position.instrument.clone())
            .or_default()
            .push(position);
    }
    groups
}
