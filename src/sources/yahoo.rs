//! Yahoo Finance API client for stock and ETF candles.
//!
//! Uses the unofficial Yahoo Finance v8 chart API (no API key).

use crate::error::{AppError, Result};
use crate::types::{BarInterval, Candle};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Normalize a symbol for the Yahoo Finance API. Exchange suffixes like
/// ".NS" are part of the symbol and survive uppercasing.
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase()
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    ///
    /// A browser user-agent: the endpoint rejects obvious bot clients.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch recent candles for a symbol at the given bar interval.
    ///
    /// Rows with missing quote values are skipped, so gaps in Yahoo's data
    /// shorten the series instead of poisoning it.
    pub async fn fetch_candles(
        &self,
        symbol: &str,
        interval: BarInterval,
    ) -> Result<Vec<Candle>> {
        let yahoo_symbol = normalize_yahoo_symbol(symbol);
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            yahoo_symbol,
            interval.yahoo_range(),
            interval.as_str()
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Yahoo API error: {}",
                response.status()
            )));
        }

        let data: YahooChartResponse = response.json().await?;

        if let Some(error) = data.chart.error {
            return Err(AppError::ExternalApi(format!(
                "Yahoo API error: {} - {}",
                error.code, error.description
            )));
        }

        let result = data
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| AppError::ExternalApi("Empty Yahoo chart response".to_string()))?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("No quote data in response".to_string()))?;

        Ok(build_candles(&timestamps, &quote))
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_candles(timestamps: &[i64], quote: &YahooQuote) -> Vec<Candle> {
    let opens = quote.open.as_deref().unwrap_or_default();
    let highs = quote.high.as_deref().unwrap_or_default();
    let lows = quote.low.as_deref().unwrap_or_default();
    let closes = quote.close.as_deref().unwrap_or_default();
    let volumes = quote.volume.as_deref().unwrap_or_default();

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            opens.get(i).copied().flatten(),
            highs.get(i).copied().flatten(),
            lows.get(i).copied().flatten(),
            closes.get(i).copied().flatten(),
        ) else {
            continue;
        };
        let volume = volumes.get(i).copied().flatten().unwrap_or(0) as f64;

        candles.push(Candle {
            time: timestamp * 1000,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    candles
}
