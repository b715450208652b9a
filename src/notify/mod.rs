//! Alert formatting and delivery.

pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::config::InstrumentConfig;
use crate::types::ReversalSignal;

/// Render a reversal signal as a Markdown alert message.
///
/// Price is formatted to 4 decimal places and confidence to 2, matching
/// what downstream chart annotations expect to parse back out.
pub fn format_alert(instrument: &InstrumentConfig, signal: &ReversalSignal) -> String {
    let emoji = signal.kind.emoji();
    format!(
        "{emoji} *Reversal Signal Detected* {emoji}\n\n\
         *Asset:* {name} ({ticker})\n\
         *Timeframe:* {interval}\n\
         *Signal:* {label}\n\
         *Price:* `{price:.4}`\n\
         *Confidence:* `{confidence:.2}%` (Simplified)",
        name = instrument.name,
        ticker = instrument.ticker,
        interval = instrument.interval,
        label = signal.kind.label(),
        price = signal.price,
        confidence = signal.confidence,
    )
}

/// The one-time message sent when the watcher comes up.
pub fn format_startup(instrument_count: usize) -> String {
    format!(
        "\u{2705} Reversal alert bot is live, watching {} instrument{}.",
        instrument_count,
        if instrument_count == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BarInterval, DataSource, ReversalKind};

    fn instrument() -> InstrumentConfig {
        InstrumentConfig {
            name: "BITCOIN".to_string(),
            ticker: "BTC/USDT".to_string(),
            source: DataSource::Binance,
            interval: BarInterval::OneHour,
            fractal_strength: 2,
            rsi_length: 14,
            rsi_top: 70.0,
            rsi_bottom: 30.0,
            min_confidence: 0.0,
        }
    }

    #[test]
    fn test_peak_alert_contents() {
        let signal = ReversalSignal {
            instrument: "BITCOIN".to_string(),
            kind: ReversalKind::Peak,
            time: 1_700_000_000_000,
            price: 43500.5,
            confidence: 85.0,
        };

        let text = format_alert(&instrument(), &signal);
        assert!(text.contains("BITCOIN"));
        assert!(text.contains("BTC/USDT"));
        assert!(text.contains("1h"));
        assert!(text.contains("PEAK REVERSAL (SHORT)"));
        assert!(text.contains("43500.5000")); // 4 decimal places
        assert!(text.contains("85.00%")); // 2 decimal places
    }

    #[test]
    fn test_valley_alert_label() {
        let signal = ReversalSignal {
            instrument: "BITCOIN".to_string(),
            kind: ReversalKind::Valley,
            time: 1_700_000_000_000,
            price: 0.1234,
            confidence: 62.5,
        };

        let text = format_alert(&instrument(), &signal);
        assert!(text.contains("VALLEY REVERSAL (LONG)"));
        assert!(text.contains("0.1234"));
        assert!(text.contains("62.50%"));
    }

    #[test]
    fn test_peak_and_valley_use_different_emoji() {
        let mut signal = ReversalSignal {
            instrument: "BITCOIN".to_string(),
            kind: ReversalKind::Peak,
            time: 0,
            price: 1.0,
            confidence: 85.0,
        };
        let peak = format_alert(&instrument(), &signal);
        signal.kind = ReversalKind::Valley;
        let valley = format_alert(&instrument(), &signal);
        assert_ne!(peak, valley);
    }

    #[test]
    fn test_startup_message() {
        assert!(format_startup(1).contains("1 instrument."));
        assert!(format_startup(2).contains("2 instruments."));
    }
}
