//! Closure selection: reduce conflict clusters to closure lists.

use crate::config::SelectorConfig;
use crate::conflict::{ConflictReason, ConflictRecord};
use std::collections::HashMap;
use tracing::{debug, info};

/// Selects which conflicting positions must be closed.
///
/// Policy: keep the oldest position in an open-open cluster, close the
/// rest; close every position flagged against a closed trade outright.
pub struct ClosureSelector {
    config: SelectorConfig,
}

impl ClosureSelector {
    /// Create a new selector with configuration.
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Flatten per-instrument conflicts into the list slated for closure.
    pub fn select(
        &self,
        conflicts: HashMap<String, Vec<ConflictRecord>>,
    ) -> Vec<ConflictRecord> {
        let mut slated = Vec::new();

        for (instrument, records) in conflicts {
            if self.config.is_excluded(&instrument) {
                debug!(
                    instrument = %instrument,
                    conflicts = records.len(),
                    "Instrument excluded from closure, skipping"
                );
                continue;
            }

            let (mut open_open, open_closed): (Vec<_>, Vec<_>) = records
                .into_iter()
                .partition(|r| r.reason == ConflictReason::OpenOpenConflict);

            // Stable sort: equal timestamps keep their original order, so
            // the survivor choice is deterministic.
            open_open.sort_by_key(|r| r.position.created_at);
            if let Some(survivor) = open_open.first() {
                info!(
                    instrument = %instrument,
                    deal_id = %survivor.position.deal_id,
                    created_at = %survivor.position.created_at,
                    "Keeping earliest position in cluster"
                );
            }
            slated.extend(open_open.into_iter().skip(1));

            // Positions too close after a prior closed trade are stale
            // duplication: no survivor is kept.
            slated.extend(open_closed);
        }

        slated
    }
}
