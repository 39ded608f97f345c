use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use recap::ai::LlmClient;
use recap::buffer::MessageBuffer;
use recap::coordinator::{Coordinator, Notifier, Summarizer};
use recap::core::config::AppConfig;
use recap::core::models::{ChatMessage, ConversationId, InboundEvent};
use recap::telegram::TelegramClient;

/// Reads newline-delimited JSON chat events from stdin and feeds them to
/// the coordinator. This is the whole inbound surface: a chat gateway (or
/// a test harness) pipes events in, summaries go out over Telegram.
#[tokio::main]
async fn main() -> Result<()> {
    recap::setup_logging();

    let config = AppConfig::from_env()?;

    let summarizer: Option<Arc<dyn Summarizer>> = match &config.ai_api_key {
        Some(api_key) => Some(Arc::new(LlmClient::new(
            config.ai_api_url.clone(),
            api_key.clone(),
            config.ai_model.clone(),
        ))),
        None => {
            warn!("RECAP_AI_API_KEY is unset, summarization cycles will be skipped");
            None
        }
    };

    let notifier: Option<Arc<dyn Notifier>> =
        match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(Arc::new(TelegramClient::new(
                bot_token.clone(),
                chat_id.clone(),
            ))),
            _ => {
                warn!("Telegram credentials are unset, summaries cannot be delivered");
                None
            }
        };

    let buffer = Arc::new(MessageBuffer::new(config.buffer_capacity));
    let coordinator = Coordinator::new(&config, Arc::clone(&buffer), summarizer, notifier);

    info!(
        threshold = config.message_threshold,
        window_hours = config.window.num_hours(),
        "listening for chat events on stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let event: InboundEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!("skipping malformed event: {e}");
                continue;
            }
        };

        let id = ConversationId::from(event.conversation);
        let message = ChatMessage::new(
            event.author,
            event.text,
            event.timestamp.unwrap_or_else(Utc::now),
        );

        let outcome = coordinator.on_message(&id, message);
        debug!(conversation = %id, ?outcome, "event ingested");
    }

    info!("stdin closed, final state:\n{}", coordinator.status_report());
    Ok(())
}
