//! Omen - fractal/RSI reversal alert server
//!
//! Polls OHLCV candle series for a configured set of instruments and sends
//! a Telegram alert the first time a fractal extreme coincides with an RSI
//! extreme on a fully confirmed bar.

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub status: Arc<services::StatusBoard>,
}

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::*;
