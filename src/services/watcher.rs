//! Periodic fetch-evaluate-alert loop.
//!
//! One pass walks the configured instruments in order: fetch candles,
//! validate the series, evaluate, gate, alert. Every failure is scoped to
//! its instrument and cycle; the loop itself never dies.

use crate::config::{Config, InstrumentConfig};
use crate::notify::{format_alert, format_startup, TelegramNotifier};
use crate::services::signals::{DedupGate, Evaluator};
use crate::services::StatusBoard;
use crate::sources::CandleFetcher;
use crate::types::{CandleSeries, ReversalSignal};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{debug, info, warn};

/// Pause between instruments within one pass.
const INSTRUMENT_PAUSE_SECS: u64 = 3;

/// The polling task that drives signal detection.
pub struct Watcher {
    config: Arc<Config>,
    fetcher: CandleFetcher,
    notifier: Option<TelegramNotifier>,
    evaluator: Evaluator,
    gate: DedupGate,
    status: Arc<StatusBoard>,
}

impl Watcher {
    pub fn new(config: Arc<Config>, status: Arc<StatusBoard>) -> Self {
        let notifier = config.telegram.as_ref().map(TelegramNotifier::new);

        Self {
            config,
            fetcher: CandleFetcher::new(),
            notifier,
            evaluator: Evaluator::default(),
            gate: DedupGate::new(),
            status,
        }
    }

    /// Run forever. Consumes the watcher: the loop is the single owner of
    /// the dedup gate.
    pub async fn run(mut self) {
        info!(
            "Starting reversal watcher for {} instruments, polling every {}s",
            self.config.instruments.len(),
            self.config.poll_interval_secs
        );

        match self.notifier {
            Some(ref notifier) => {
                notifier
                    .send(&format_startup(self.config.instruments.len()))
                    .await;
            }
            None => {
                warn!("Telegram not configured; signals will only be logged");
            }
        }

        loop {
            self.run_pass().await;
            debug!(
                "Cycle complete; sleeping {}s",
                self.config.poll_interval_secs
            );
            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    async fn run_pass(&mut self) {
        let instruments = self.config.instruments.clone();
        for instrument in &instruments {
            self.check_instrument(instrument).await;
            tokio::time::sleep(Duration::from_secs(INSTRUMENT_PAUSE_SECS)).await;
        }
    }

    async fn check_instrument(&mut self, instrument: &InstrumentConfig) {
        info!(
            "Checking {} ({}) on {}",
            instrument.name, instrument.ticker, instrument.interval
        );

        let candles = match self.fetcher.fetch(instrument).await {
            Ok(candles) => candles,
            Err(e) => {
                warn!("{}: fetch failed: {}", instrument.name, e);
                self.status.record_error(&instrument.name, &e.to_string());
                return;
            }
        };

        if candles.is_empty() {
            warn!("{}: no candles returned, skipping", instrument.name);
            self.status.record_check(&instrument.name, 0);
            return;
        }

        let series = match CandleSeries::new(candles) {
            Ok(series) => series,
            Err(e) => {
                warn!("{}: {}", instrument.name, e);
                self.status.record_error(&instrument.name, &e.to_string());
                return;
            }
        };

        self.status.record_check(&instrument.name, series.len());

        match detect_new_signal(&self.evaluator, &mut self.gate, instrument, &series) {
            Some(signal) => {
                info!(
                    "{}: {:?} at {} (price {:.4}, confidence {:.2})",
                    instrument.name, signal.kind, signal.time, signal.price, signal.confidence
                );
                self.status
                    .record_signal(&instrument.name, signal.time, signal.kind);

                if let Some(ref notifier) = self.notifier {
                    notifier.send(&format_alert(instrument, &signal)).await;
                }
            }
            None => debug!("{}: no new signal", instrument.name),
        }
    }
}

/// One detection step: evaluate the series and pass the result through the
/// dedup gate. Returns a signal only when its anchor has not been alerted
/// for this instrument before.
pub fn detect_new_signal(
    evaluator: &Evaluator,
    gate: &mut DedupGate,
    instrument: &InstrumentConfig,
    series: &CandleSeries,
) -> Option<ReversalSignal> {
    let signal = evaluator.evaluate(instrument, series)?;
    if gate.observe(&instrument.name, signal.time) {
        Some(signal)
    } else {
        debug!(
            "{}: signal at {} already alerted",
            instrument.name, signal.time
        );
        None
    }
}
