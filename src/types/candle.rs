use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Candle bar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl BarInterval {
    /// Parse the interval from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1m" => Some(BarInterval::OneMinute),
            "5m" => Some(BarInterval::FiveMinutes),
            "15m" => Some(BarInterval::FifteenMinutes),
            "30m" => Some(BarInterval::ThirtyMinutes),
            "1h" => Some(BarInterval::OneHour),
            "4h" => Some(BarInterval::FourHours),
            "1d" => Some(BarInterval::OneDay),
            _ => None,
        }
    }

    /// Interval string as used in data-source query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::OneMinute => "1m",
            BarInterval::FiveMinutes => "5m",
            BarInterval::FifteenMinutes => "15m",
            BarInterval::ThirtyMinutes => "30m",
            BarInterval::OneHour => "1h",
            BarInterval::FourHours => "4h",
            BarInterval::OneDay => "1d",
        }
    }

    /// Yahoo Finance lookback range wide enough for a useful series at
    /// this interval.
    pub fn yahoo_range(&self) -> &'static str {
        match self {
            BarInterval::OneMinute | BarInterval::FiveMinutes => "5d",
            BarInterval::FifteenMinutes | BarInterval::ThirtyMinutes => "7d",
            BarInterval::OneHour | BarInterval::FourHours => "1mo",
            BarInterval::OneDay => "6mo",
        }
    }

    /// Bar duration in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            BarInterval::OneMinute => 60,
            BarInterval::FiveMinutes => 300,
            BarInterval::FifteenMinutes => 900,
            BarInterval::ThirtyMinutes => 1800,
            BarInterval::OneHour => 3600,
            BarInterval::FourHours => 14400,
            BarInterval::OneDay => 86400,
        }
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Candle data source identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Binance,
    Yahoo,
}

impl DataSource {
    /// Parse the source from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "binance" => Some(DataSource::Binance),
            "yahoo" => Some(DataSource::Yahoo),
            _ => None,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Binance => write!(f, "binance"),
            DataSource::Yahoo => write!(f, "yahoo"),
        }
    }
}

/// One OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time, Unix milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// True if every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}

/// Candle series validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("non-finite value in candle at index {0}")]
    NonFinite(usize),
    #[error("timestamp at index {0} is not strictly increasing")]
    NonMonotonic(usize),
}

/// A validated, time-ordered OHLCV series for one instrument.
///
/// Timestamps are strictly increasing and every field is finite; an empty
/// series is valid. Replaced wholesale on each fetch, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Validate and wrap a candle vector.
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        for (i, candle) in candles.iter().enumerate() {
            if !candle.is_finite() {
                return Err(SeriesError::NonFinite(i));
            }
            if i > 0 && candle.time <= candles[i - 1].time {
                return Err(SeriesError::NonMonotonic(i));
            }
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    /// Close prices, index-aligned with the series.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// High prices, index-aligned with the series.
    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Low prices, index-aligned with the series.
    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }
}
