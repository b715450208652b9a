/**
 * Watcher Pipeline Tests
 *
 * Drives the per-cycle detection step the watcher runs (evaluate, dedup
 * gate, alert formatting) across successive polling passes, without any
 * network traffic.
 */

use omen::config::InstrumentConfig;
use omen::notify::format_alert;
use omen::services::signals::DedupGate;
use omen::services::{detect_new_signal, Evaluator, StatusBoard};
use omen::types::{BarInterval, Candle, CandleSeries, DataSource, ReversalKind, SeriesError};

const BASE_TIME: i64 = 1_700_000_000_000;
const HOUR_MS: i64 = 3_600_000;

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

/// Rising bars with lone high spikes at the given indices.
fn spiked_series(len: usize, spikes: &[usize]) -> CandleSeries {
    let candles: Vec<Candle> = (0..len)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.5;
            let high = if spikes.contains(&i) {
                500.0 + i as f64
            } else {
                close + 1.0
            };
            Candle {
                time: BASE_TIME + i as i64 * HOUR_MS,
                open: close,
                high,
                low: close - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect();
    CandleSeries::new(candles).unwrap()
}

#[test]
fn scenario_c_three_polling_passes() {
    let evaluator = Evaluator::default();
    let mut gate = DedupGate::new();
    let config = instrument();

    // Pass 1: 60 bars, anchor 57 is a confirmed peak -> novel.
    let first = spiked_series(60, &[57]);
    let signal = detect_new_signal(&evaluator, &mut gate, &config, &first)
        .expect("first pass should alert");
    let anchor_time = BASE_TIME + 57 * HOUR_MS;
    assert_eq!(signal.kind, ReversalKind::Peak);
    assert_eq!(signal.time, anchor_time);

    // Pass 2: the poller re-fetches before a new bar closes; the same
    // anchor comes back and must stay silent.
    let second = spiked_series(60, &[57]);
    assert!(detect_new_signal(&evaluator, &mut gate, &config, &second).is_none());
    assert_eq!(gate.last_anchor("BITCOIN"), Some(anchor_time));

    // Pass 3: three more bars close and a fresh fractal confirms at index
    // 60 -> novel again.
    let third = spiked_series(63, &[57, 60]);
    let next = detect_new_signal(&evaluator, &mut gate, &config, &third)
        .expect("new anchor should alert");
    assert_eq!(next.time, BASE_TIME + 60 * HOUR_MS);
    assert!(next.time > anchor_time);
    assert_eq!(gate.last_anchor("BITCOIN"), Some(next.time));
}

#[test]
fn no_signal_leaves_the_gate_untouched() {
    let evaluator = Evaluator::default();
    let mut gate = DedupGate::new();
    let config = instrument();

    // Monotonic series: no fractal, no signal, no stored anchor.
    let series = spiked_series(60, &[]);
    assert!(detect_new_signal(&evaluator, &mut gate, &config, &series).is_none());
    assert_eq!(gate.last_anchor("BITCOIN"), None);
}

#[test]
fn gate_state_is_per_instrument() {
    let evaluator = Evaluator::default();
    let mut gate = DedupGate::new();
    let series = spiked_series(60, &[57]);

    let btc = instrument();
    let mut eth = instrument();
    eth.name = "ETHEREUM".to_string();

    assert!(detect_new_signal(&evaluator, &mut gate, &btc, &series).is_some());
    assert!(detect_new_signal(&evaluator, &mut gate, &eth, &series).is_some());
    assert!(detect_new_signal(&evaluator, &mut gate, &btc, &series).is_none());
}

#[test]
fn alert_message_carries_the_signal_details() {
    let evaluator = Evaluator::default();
    let mut gate = DedupGate::new();
    let config = instrument();

    let series = spiked_series(60, &[57]);
    let signal = detect_new_signal(&evaluator, &mut gate, &config, &series).unwrap();

    let text = format_alert(&config, &signal);
    assert!(text.contains("BITCOIN"));
    assert!(text.contains("BTC/USDT"));
    assert!(text.contains("1h"));
    assert!(text.contains("PEAK REVERSAL (SHORT)"));
    // close[57] = 100 + 57 * 0.5, shown to 4 decimal places
    assert!(text.contains("128.5000"));
    assert!(text.contains("85.00%"));
}

#[test]
fn malformed_fetch_results_never_reach_the_evaluator() {
    // Out-of-order timestamps are rejected at series construction, which is
    // what lets the watcher skip the instrument instead of crashing.
    let mut candles: Vec<Candle> = (0..5)
        .map(|i| Candle {
            time: BASE_TIME + i as i64 * HOUR_MS,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.0,
            volume: 1.0,
        })
        .collect();
    candles[3].time = candles[1].time;

    assert_eq!(
        CandleSeries::new(candles).unwrap_err(),
        SeriesError::NonMonotonic(3)
    );
}

#[test]
fn status_board_tracks_a_full_cycle() {
    let board = StatusBoard::new();
    let evaluator = Evaluator::default();
    let mut gate = DedupGate::new();
    let config = instrument();

    let series = spiked_series(60, &[57]);
    board.record_check(&config.name, series.len());

    if let Some(signal) = detect_new_signal(&evaluator, &mut gate, &config, &series) {
        board.record_signal(&config.name, signal.time, signal.kind);
    }

    let snapshot = board.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].candle_count, 60);
    assert_eq!(snapshot[0].alerts_sent, 1);
    assert_eq!(snapshot[0].last_signal_kind, Some(ReversalKind::Peak));
    assert_eq!(
        snapshot[0].last_signal_time,
        Some(BASE_TIME + 57 * HOUR_MS)
    );
}
