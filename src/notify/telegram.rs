//! Telegram bot API delivery.

use crate::config::TelegramConfig;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Delivers alert messages through the Telegram bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a new notifier for one bot + chat.
    pub fn new(config: &TelegramConfig) -> Self {
        let client = Client::builder()
            .user_agent("Omen/1.0")
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    /// Send a Markdown message to the configured chat.
    ///
    /// Delivery failure is logged and swallowed; a missed alert must never
    /// take the watcher down.
    pub async fn send(&self, text: &str) {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_URL, self.bot_token);
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Telegram alert sent");
            }
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                error!(
                    "Telegram API returned {}: {}",
                    status,
                    &text[..text.len().min(200)]
                );
            }
            Err(e) => {
                error!("Failed to send Telegram alert: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_creation() {
        let notifier = TelegramNotifier::new(&TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_id: "-100200300".to_string(),
        });
        assert_eq!(notifier.bot_token, "123:abc");
        assert_eq!(notifier.chat_id, "-100200300");
    }
}
