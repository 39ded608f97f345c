//! Outbound notification text rendering.
//!
//! This module provides standardized ways to render the messages the
//! service posts to Telegram: summary notices, the status report, and
//! the delivery test notice.

use chrono::{DateTime, Utc};

use crate::core::models::ConversationId;
use crate::prompt::TIMESTAMP_FORMAT;

/// Snapshot of one conversation for the status report.
#[derive(Debug, Clone)]
pub struct ConversationStatus {
    pub conversation: ConversationId,
    pub buffered: usize,
    pub last_summary: Option<DateTime<Utc>>,
}

/// Render the summary notification posted after a successful cycle:
/// conversation, report time, batch size, and the summary text.
#[must_use]
pub fn summary_notice(
    conversation: &ConversationId,
    at: DateTime<Utc>,
    message_count: usize,
    summary: &str,
) -> String {
    format!(
        "📊 Summary for group {conversation}\n\n\
         📅 Time: {}\n\
         💬 Messages: {message_count}\n\n\
         📝 Summary:\n{summary}",
        at.format(TIMESTAMP_FORMAT)
    )
}

/// Render the per-conversation status report.
#[must_use]
pub fn status_report(statuses: &[ConversationStatus]) -> String {
    let mut text = String::from("📊 Conversation status:\n\n");

    if statuses.is_empty() {
        text.push_str("no buffered conversations\n");
        return text;
    }

    for status in statuses {
        text.push_str(&format!("Group {}:\n", status.conversation));
        text.push_str(&format!("  buffered messages: {}\n", status.buffered));
        match status.last_summary {
            Some(at) => {
                text.push_str(&format!("  last summary: {}\n", at.format(TIMESTAMP_FORMAT)));
            }
            None => text.push_str("  last summary: never\n"),
        }
        text.push('\n');
    }

    text
}

/// Render the canned delivery-test notice.
#[must_use]
pub fn test_notice(at: DateTime<Utc>) -> String {
    format!(
        "🧪 Test message\nTime: {}\nSent by the recap group summary bot.",
        at.format(TIMESTAMP_FORMAT)
    )
}
