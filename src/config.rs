use crate::types::{BarInterval, DataSource};
use std::env;
use tracing::warn;

/// Telegram delivery configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token.
    pub bot_token: String,
    /// Chat to deliver alerts to.
    pub chat_id: String,
}

/// Detection configuration for one tracked instrument.
///
/// Immutable for the process lifetime; one instance per instrument.
#[derive(Debug, Clone)]
pub struct InstrumentConfig {
    /// Display name (e.g. "BITCOIN").
    pub name: String,
    /// Source-specific ticker (e.g. "BTC/USDT", "RELIANCE.NS").
    pub ticker: String,
    /// Which candle source serves this instrument.
    pub source: DataSource,
    /// Bar interval to evaluate on.
    pub interval: BarInterval,
    /// Fractal window half-width N (window is 2N+1 bars).
    pub fractal_strength: usize,
    /// RSI averaging period.
    pub rsi_length: usize,
    /// RSI level above which a fractal high becomes a peak signal.
    pub rsi_top: f64,
    /// RSI level below which a fractal low becomes a valley signal.
    pub rsi_bottom: f64,
    /// Signals with confidence below this are suppressed.
    pub min_confidence: f64,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Telegram delivery; None runs detection without alerts.
    pub telegram: Option<TelegramConfig>,
    /// Instruments to watch.
    pub instruments: Vec<InstrumentConfig>,
    /// Seconds between evaluation cycles.
    pub poll_interval_secs: u64,
}

/// Parse the INSTRUMENTS env var.
///
/// Format: `name|ticker|source|interval|strength|rsiLen|rsiTop|rsiBot[|minConf]`,
/// comma-separated. Entries that fail to parse are dropped with a warning.
pub fn parse_instruments(raw: &str) -> Vec<InstrumentConfig> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.trim().split('|').collect();
            if parts.len() < 8 {
                warn!("Ignoring malformed instrument entry: {}", entry);
                return None;
            }

            let source = DataSource::from_str(parts[2])?;
            let interval = BarInterval::from_str(parts[3])?;
            let fractal_strength: usize = parts[4].parse().ok().filter(|n| *n >= 1)?;
            let rsi_length: usize = parts[5].parse().ok().filter(|n| *n >= 1)?;
            let rsi_top: f64 = parts[6].parse().ok()?;
            let rsi_bottom: f64 = parts[7].parse().ok()?;
            let min_confidence: f64 = parts
                .get(8)
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0);

            Some(InstrumentConfig {
                name: parts[0].to_string(),
                ticker: parts[1].to_string(),
                source,
                interval,
                fractal_strength,
                rsi_length,
                rsi_top,
                rsi_bottom,
                min_confidence,
            })
        })
        .collect()
}

/// The instruments watched when INSTRUMENTS is unset.
pub fn default_instruments() -> Vec<InstrumentConfig> {
    vec![
        InstrumentConfig {
            name: "RELIANCE".to_string(),
            ticker: "RELIANCE.NS".to_string(),
            source: DataSource::Yahoo,
            interval: BarInterval::FifteenMinutes,
            fractal_strength: 2,
            rsi_length: 17,
            rsi_top: 65.0,
            rsi_bottom: 40.0,
            min_confidence: 0.0,
        },
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
        },
    ]
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(10000);

        let telegram = match (
            env::var("TELEGRAM_BOT_TOKEN").ok(),
            env::var("TELEGRAM_CHAT_ID").ok(),
        ) {
            (Some(bot_token), Some(chat_id)) if !bot_token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramConfig { bot_token, chat_id })
            }
            _ => None,
        };

        let instruments = env::var("INSTRUMENTS")
            .ok()
            .map(|raw| parse_instruments(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(default_instruments);

        Self {
            host,
            port,
            telegram,
            instruments,
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
