//! Telegram Bot API client module
//!
//! Posts rendered notifications to a fixed chat via `sendMessage` on the
//! bot-token-addressed URL.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::json;

use crate::coordinator::Notifier;
use crate::errors::RecapError;
use crate::telegram::render;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

// Static HTTP client
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Telegram delivery client addressing one bot token and one chat.
pub struct TelegramClient {
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self { bot_token, chat_id }
    }

    fn send_message_url(&self) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", self.bot_token)
    }

    /// Post a canned test notice to verify token and chat id.
    pub async fn send_test(&self) -> Result<(), RecapError> {
        self.post_text(&render::test_notice(Utc::now())).await
    }

    async fn post_text(&self, text: &str) -> Result<(), RecapError> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = HTTP_CLIENT
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| RecapError::Http(format!("sendMessage request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(RecapError::Notifier(format!("{status}: {body_text}")));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn deliver(&self, text: &str) -> Result<(), RecapError> {
        self.post_text(text).await
    }
}
