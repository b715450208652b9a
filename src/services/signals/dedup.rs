//! At-most-once gating of alerts per anchored signal.

use std::collections::HashMap;

/// Per-instrument memory of the last alerted anchor time.
///
/// Owned by the watcher and threaded through each cycle; the single-writer
/// discipline means no locking. Intentionally not persisted: a restart may
/// repeat at most one alert per instrument.
#[derive(Debug, Default)]
pub struct DedupGate {
    last_anchor: HashMap<String, i64>,
}

impl DedupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff this anchor has not been alerted for the instrument yet.
    ///
    /// Stores the anchor before reporting novelty, so at most one caller
    /// ever sees `true` for a given (instrument, anchor) pair.
    pub fn observe(&mut self, instrument: &str, anchor_time: i64) -> bool {
        match self.last_anchor.get(instrument) {
            Some(&last) if last == anchor_time => false,
            _ => {
                self.last_anchor.insert(instrument.to_string(), anchor_time);
                true
            }
        }
    }

    /// Last alerted anchor time for an instrument, if any.
    pub fn last_anchor(&self, instrument: &str) -> Option<i64> {
        self.last_anchor.get(instrument).copied()
    }
}
