//! Combines RSI and fractal flags into an optional reversal signal.

use crate::config::InstrumentConfig;
use crate::services::signals::{fractal_series, rsi_series, ConfidenceModel, FixedConfidence};
use crate::types::{CandleSeries, ReversalKind, ReversalSignal};
use tracing::debug;

/// Fewest candles worth evaluating.
pub const MIN_SERIES_LEN: usize = 50;

/// Evaluates one candle series against an instrument's thresholds.
///
/// A pure function of its inputs: the same series and config always produce
/// the same result, and every failure mode (short series, undefined RSI,
/// incomplete fractal window) degrades to `None` rather than an error.
pub struct Evaluator {
    confidence: Box<dyn ConfidenceModel>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Box::new(FixedConfidence))
    }
}

impl Evaluator {
    pub fn new(confidence: Box<dyn ConfidenceModel>) -> Self {
        Self { confidence }
    }

    /// Evaluate the most recent confirmed bar of the series.
    ///
    /// The anchor is `len - (strength + 1)`: the newest index whose fractal
    /// window is complete on both sides. The trailing `strength` bars are
    /// never inspected because their windows are still forming.
    pub fn evaluate(
        &self,
        instrument: &InstrumentConfig,
        series: &CandleSeries,
    ) -> Option<ReversalSignal> {
        let len = series.len();
        if len < MIN_SERIES_LEN {
            debug!(
                "{}: {} candles, below minimum of {}",
                instrument.name, len, MIN_SERIES_LEN
            );
            return None;
        }

        let strength = instrument.fractal_strength;
        let anchor = len.checked_sub(strength + 1)?;

        let rsi = rsi_series(&series.closes(), instrument.rsi_length);
        let rsi_value = rsi.get(anchor).copied().flatten()?;

        let flags = fractal_series(&series.highs(), &series.lows(), strength);
        let is_high = flags.is_high(anchor)?;
        let is_low = flags.is_low(anchor)?;

        // Peak wins the degenerate case where both conditions hold.
        let kind = if is_high && rsi_value > instrument.rsi_top {
            ReversalKind::Peak
        } else if is_low && rsi_value < instrument.rsi_bottom {
            ReversalKind::Valley
        } else {
            debug!(
                "{}: no reversal at anchor (rsi {:.2}, fractal high {}, low {})",
                instrument.name, rsi_value, is_high, is_low
            );
            return None;
        };

        let confidence = self.confidence.score(series, anchor, kind);
        if confidence < instrument.min_confidence {
            debug!(
                "{}: {:?} suppressed, confidence {:.2} below minimum {:.2}",
                instrument.name, kind, confidence, instrument.min_confidence
            );
            return None;
        }

        let candle = series.get(anchor)?;
        Some(ReversalSignal {
            instrument: instrument.name.clone(),
            kind,
            time: candle.time,
            price: candle.close,
            confidence,
        })
    }
}
