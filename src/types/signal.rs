use serde::{Deserialize, Serialize};

/// Direction of a detected reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReversalKind {
    /// Fractal high with overbought RSI; price likely to turn down.
    Peak,
    /// Fractal low with oversold RSI; price likely to turn up.
    Valley,
}

impl ReversalKind {
    /// Display label for alert messages.
    pub fn label(&self) -> &'static str {
        match self {
            ReversalKind::Peak => "PEAK REVERSAL (SHORT)",
            ReversalKind::Valley => "VALLEY REVERSAL (LONG)",
        }
    }

    /// Emoji marker for alert messages.
    pub fn emoji(&self) -> &'static str {
        match self {
            ReversalKind::Peak => "\u{1F534}",
            ReversalKind::Valley => "\u{1F7E2}",
        }
    }
}

/// A reversal signal anchored to one confirmed bar.
///
/// Ephemeral: produced and consumed within a single evaluation cycle. Only
/// the anchor time outlives the cycle, inside the dedup gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversalSignal {
    /// Instrument display name this signal belongs to.
    pub instrument: String,
    pub kind: ReversalKind,
    /// Anchor bar open time, Unix milliseconds.
    pub time: i64,
    /// Anchor bar close price.
    pub price: f64,
    /// Confidence percentage (0-100).
    pub confidence: f64,
}
