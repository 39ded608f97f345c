use crate::core::models::ChatMessage;

/// Placeholder substituted with the formatted transcript when rendering
/// the summary prompt.
pub const MESSAGES_PLACEHOLDER: &str = "{messages}";

/// Default prompt template used when none is configured.
pub const DEFAULT_SUMMARY_PROMPT: &str = "Summarize the main topics and key points of the \
following group chat messages. Reply concisely:\n\n{messages}";

/// Upper bound on transcript size sent to the model. Oldest lines are
/// dropped first when the formatted transcript exceeds this.
pub const MAX_TRANSCRIPT_CHARS: usize = 60_000;

/// Timestamp format used in transcript lines and rendered notifications.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a batch of messages into the transcript blob handed to the
/// summarizer: one `[timestamp] author: text` line per message, in the
/// order given (callers pass batches chronologically).
#[must_use]
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    let mut lines: Vec<String> = messages
        .iter()
        .map(|msg| {
            format!(
                "[{}] {}: {}",
                msg.timestamp.format(TIMESTAMP_FORMAT),
                msg.author,
                msg.text
            )
        })
        .collect();

    // +1 per line for the joining newline; close enough for a cap.
    let mut total: usize = lines.iter().map(|l| l.chars().count() + 1).sum();
    let mut dropped = 0usize;
    while total > MAX_TRANSCRIPT_CHARS && lines.len() > 1 {
        let removed = lines.remove(0);
        total -= removed.chars().count() + 1;
        dropped += 1;
    }
    if dropped > 0 {
        tracing::info!("transcript over budget, dropped {dropped} oldest lines");
    }

    lines.join("\n")
}

/// Render the summary prompt from a template and a formatted transcript.
///
/// Substitutes `{messages}`; a template without the placeholder gets the
/// transcript appended after a blank line. Template shape is validated at
/// config load, so the fallback only covers hand-built templates.
#[must_use]
pub fn render_prompt(template: &str, transcript: &str) -> String {
    if template.contains(MESSAGES_PLACEHOLDER) {
        template.replace(MESSAGES_PLACEHOLDER, transcript)
    } else {
        format!("{template}\n\n{transcript}")
    }
}
