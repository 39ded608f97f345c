//! recap - buffers group-chat messages and relays AI summaries to Telegram.
//!
//! The crate watches a stream of inbound group messages, keeps a bounded
//! per-conversation buffer, and once a conversation accumulates enough
//! recent traffic it runs a summarization cycle: the buffered batch is
//! formatted into a transcript, sent to a chat-completion model, and the
//! resulting summary is posted to a Telegram chat.
//!
//! # Architecture
//!
//! The system uses:
//! - [`buffer::MessageBuffer`] as the bounded per-conversation message store
//! - [`coordinator::Coordinator`] for trigger evaluation and cycle execution
//! - [`ai::LlmClient`] for chat-completion calls over reqwest
//! - [`telegram::TelegramClient`] for `sendMessage` delivery
//! - Tokio for the async runtime; cycles run as spawned tasks
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use chrono::Utc;
//! use recap::buffer::MessageBuffer;
//! use recap::coordinator::Coordinator;
//! use recap::core::config::AppConfig;
//! use recap::core::models::{ChatMessage, ConversationId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Set up structured logging
//!     recap::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let buffer = Arc::new(MessageBuffer::new(config.buffer_capacity));
//!
//!     // No collaborators configured: messages buffer up but cycles are skipped.
//!     let coordinator = Coordinator::new(&config, Arc::clone(&buffer), None, None);
//!
//!     let id = ConversationId::from("g1");
//!     let outcome = coordinator.on_message(
//!         &id,
//!         ChatMessage::new("alice", "shipping the release today", Utc::now()),
//!     );
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod buffer;
pub mod coordinator;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod telegram;

/// Configure structured logging for the service.
///
/// Sets up tracing-subscriber with an env-filter (`RUST_LOG`, defaulting to
/// `info`). Call once at the start of the process.
///
/// # Example
///
/// ```no_run
/// recap::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
