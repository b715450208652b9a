pub mod binance;
pub mod yahoo;

pub use binance::BinanceClient;
pub use yahoo::YahooFinanceClient;

use crate::config::InstrumentConfig;
use crate::error::Result;
use crate::types::{Candle, DataSource};

/// Dispatches candle fetches to the client serving each instrument.
pub struct CandleFetcher {
    binance: BinanceClient,
    yahoo: YahooFinanceClient,
}

impl CandleFetcher {
    pub fn new() -> Self {
        Self {
            binance: BinanceClient::new(),
            yahoo: YahooFinanceClient::new(),
        }
    }

    /// Fetch the latest candle series for one instrument.
    pub async fn fetch(&self, instrument: &InstrumentConfig) -> Result<Vec<Candle>> {
        match instrument.source {
            DataSource::Binance => {
                self.binance
                    .fetch_candles(&instrument.ticker, instrument.interval)
                    .await
            }
            DataSource::Yahoo => {
                self.yahoo
                    .fetch_candles(&instrument.ticker, instrument.interval)
                    .await
            }
        }
    }
}

impl Default for CandleFetcher {
    fn default() -> Self {
        Self::new()
    }
}
