//! Shared per-instrument watcher status for the HTTP surface.

use crate::types::ReversalKind;
use dashmap::DashMap;
use serde::Serialize;

/// The watcher's latest view of one instrument.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentStatus {
    /// Instrument display name.
    pub name: String,
    /// Wall-clock time of the last check, Unix milliseconds.
    pub last_checked: i64,
    /// Candles seen on the last successful fetch.
    pub candle_count: usize,
    /// Error from the last check, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Anchor time of the last emitted signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_signal_time: Option<i64>,
    /// Kind of the last emitted signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_signal_kind: Option<ReversalKind>,
    /// Alerts emitted since startup.
    pub alerts_sent: u64,
}

impl InstrumentStatus {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            last_checked: 0,
            candle_count: 0,
            last_error: None,
            last_signal_time: None,
            last_signal_kind: None,
            alerts_sent: 0,
        }
    }
}

/// Thread-safe registry of instrument statuses, shared between the watcher
/// task and the HTTP handlers.
pub struct StatusBoard {
    entries: DashMap<String, InstrumentStatus>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Record a successful check.
    pub fn record_check(&self, name: &str, candle_count: usize) {
        let mut entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| InstrumentStatus::new(name));
        entry.last_checked = chrono::Utc::now().timestamp_millis();
        entry.candle_count = candle_count;
        entry.last_error = None;
    }

    /// Record a failed check.
    pub fn record_error(&self, name: &str, error: &str) {
        let mut entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| InstrumentStatus::new(name));
        entry.last_checked = chrono::Utc::now().timestamp_millis();
        entry.last_error = Some(error.to_string());
    }

    /// Record an emitted signal.
    pub fn record_signal(&self, name: &str, anchor_time: i64, kind: ReversalKind) {
        let mut entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| InstrumentStatus::new(name));
        entry.last_signal_time = Some(anchor_time);
        entry.last_signal_kind = Some(kind);
        entry.alerts_sent += 1;
    }

    /// Snapshot of all instrument statuses, ordered by name.
    pub fn snapshot(&self) -> Vec<InstrumentStatus> {
        let mut statuses: Vec<InstrumentStatus> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        statuses.sort_by(|a, b| a.name.cmp(&b.name));
        statuses
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
