//! Binance klines REST client.

use crate::error::{AppError, Result};
use crate::types::{BarInterval, Candle};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";
const KLINE_LIMIT: u32 = 200;

/// Normalize a ticker for Binance ("BTC/USDT" -> "BTCUSDT").
fn normalize_binance_pair(ticker: &str) -> String {
    ticker.replace('/', "").to_uppercase()
}

/// Binance REST client for OHLCV candles.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Omen/1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch the most recent candles for a trading pair.
    ///
    /// Kline rows are positional JSON arrays: open time (ms), open, high,
    /// low, close, volume, close time, ...; prices are quoted as strings.
    pub async fn fetch_candles(
        &self,
        ticker: &str,
        interval: BarInterval,
    ) -> Result<Vec<Candle>> {
        let pair = normalize_binance_pair(ticker);
        let url = format!(
            "{}/klines?symbol={}&interval={}&limit={}",
            BINANCE_API_URL,
            pair,
            interval.as_str(),
            KLINE_LIMIT
        );

        debug!("Fetching Binance klines: {} {}", pair, interval);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "Binance API returned {}: {}",
                status,
                &text[..text.len().min(200)]
            );
            return Err(AppError::ExternalApi(format!(
                "Binance API error: {}",
                status
            )));
        }

        let rows: Vec<Vec<Value>> = response.json().await?;
        Ok(parse_klines(&rows))
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode kline rows into candles, dropping rows that fail to parse.
fn parse_klines(rows: &[Vec<Value>]) -> Vec<Candle> {
    rows.iter()
        .filter_map(|row| {
            let time = row.first()?.as_i64()?;
            let open = field_as_f64(row.get(1)?)?;
            let high = field_as_f64(row.get(2)?)?;
            let low = field_as_f64(row.get(3)?)?;
            let close = field_as_f64(row.get(4)?)?;
            let volume = field_as_f64(row.get(5)?)?;

            Some(Candle {
                time,
                open,
                high,
                low,
                close,
                volume,
            })
        })
        .collect()
}

fn field_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
