//! Summarization coordinator: trigger evaluation and cycle execution.
//!
//! Trigger policy is threshold + cool-down window: a conversation fires
//! when it has at least `message_threshold` messages inside the lookback
//! window and its previous summary is older than the window. Nothing is
//! drained on trigger; stale messages age out of the window and the
//! cool-down keeps one window from being summarized twice.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::buffer::MessageBuffer;
use crate::core::config::AppConfig;
use crate::core::models::{ChatMessage, ConversationId};
use crate::errors::RecapError;
use crate::prompt::format_transcript;
use crate::telegram::render::{self, ConversationStatus};

/// Produces a summary for a formatted transcript. Implementations are
/// expected to bound their own request time; an error or an empty reply
/// both read as "no summary produced".
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        transcript: &str,
        prompt_template: &str,
    ) -> Result<String, RecapError>;
}

/// Delivers a rendered notification to the outbound channel. Failures are
/// logged by the cycle, never raised as fatal.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), RecapError>;
}

/// What happened to one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Conversation is not on the allow-list; the message was dropped
    /// before reaching the buffer.
    Ignored,
    /// Message buffered; trigger conditions not met.
    Buffered,
    /// Trigger conditions met but a collaborator is unconfigured; the
    /// buffered backlog is retained for a later cycle.
    Skipped,
    /// A cycle for this conversation is already running.
    CycleRunning,
    /// The previous summary is still within the cool-down window.
    CoolingDown,
    /// A summarization cycle was started.
    CycleStarted,
}

#[derive(Debug, Default)]
struct ConversationState {
    last_summary: Option<DateTime<Utc>>,
    in_progress: bool,
}

type StateMap = Arc<Mutex<HashMap<ConversationId, ConversationState>>>;

/// Per-conversation trigger evaluation and cycle execution.
///
/// Holds the injected message store and the per-conversation state map.
/// `None` collaborators model "backend not configured": trigger hits are
/// skipped without consuming buffered messages.
pub struct Coordinator {
    buffer: Arc<MessageBuffer>,
    states: StateMap,
    threshold: usize,
    window: chrono::Duration,
    allowed: HashSet<String>,
    prompt_template: String,
    summarizer: Option<Arc<dyn Summarizer>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl Coordinator {
    pub fn new(
        config: &AppConfig,
        buffer: Arc<MessageBuffer>,
        summarizer: Option<Arc<dyn Summarizer>>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            buffer,
            states: Arc::new(Mutex::new(HashMap::new())),
            threshold: config.message_threshold,
            window: config.window,
            allowed: config.allowed_conversations.clone(),
            prompt_template: config.summary_prompt.clone(),
            summarizer,
            notifier,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &MessageBuffer {
        &self.buffer
    }

    /// Ingest one message and evaluate the trigger for its conversation.
    ///
    /// Never suspends: the append and the check-and-set of the cycle flag
    /// happen in uninterrupted critical sections, so two near-simultaneous
    /// calls cannot both start a cycle. Must be called from within a Tokio
    /// runtime, since a fired trigger spawns the cycle task.
    pub fn on_message(&self, id: &ConversationId, message: ChatMessage) -> IngestOutcome {
        if !self.allowed.is_empty() && !self.allowed.contains(id.as_str()) {
            debug!(conversation = %id, "conversation not on allow-list, dropping message");
            return IngestOutcome::Ignored;
        }

        self.buffer.append(id, message);

        if self.buffer.len(id) < self.threshold {
            return IngestOutcome::Buffered;
        }

        // Readiness runs before the state lock so an unconfigured
        // collaborator never costs buffered messages.
        let Some(summarizer) = self.summarizer.clone() else {
            warn!(conversation = %id, "message threshold reached but no summarizer is configured, skipping cycle");
            return IngestOutcome::Skipped;
        };
        let Some(notifier) = self.notifier.clone() else {
            warn!(conversation = %id, "message threshold reached but notifier credentials are unset, skipping cycle");
            return IngestOutcome::Skipped;
        };

        let now = Utc::now();
        let batch = {
            let mut states = self.states.lock().expect("conversation state lock poisoned");
            let state = states.entry(id.clone()).or_default();

            if state.in_progress {
                debug!(conversation = %id, "cycle already running, ignoring trigger");
                return IngestOutcome::CycleRunning;
            }

            if let Some(last) = state.last_summary
                && now - last < self.window
            {
                debug!(conversation = %id, "previous summary within cool-down window");
                return IngestOutcome::CoolingDown;
            }

            let cutoff = now - self.window;
            let mut recent: Vec<ChatMessage> = self
                .buffer
                .peek_all(id)
                .into_iter()
                .filter(|msg| msg.timestamp >= cutoff)
                .collect();
            if recent.len() < self.threshold {
                return IngestOutcome::Buffered;
            }

            // Cap the batch to the most recent `threshold` messages.
            let batch = recent.split_off(recent.len() - self.threshold);

            // The window counts as settled from here on, whether or not
            // the summarizer produces output.
            state.in_progress = true;
            state.last_summary = Some(now);
            batch
        };

        let cycle_id = Uuid::new_v4();
        info!(
            conversation = %id,
            count = batch.len(),
            %cycle_id,
            "trigger fired, starting summarization cycle"
        );

        let states = Arc::clone(&self.states);
        let id = id.clone();
        let template = self.prompt_template.clone();
        tokio::spawn(async move {
            let _release = CycleGuard {
                states,
                id: id.clone(),
            };
            run_cycle(&id, batch, &template, &*summarizer, &*notifier, cycle_id).await;
        });

        IngestOutcome::CycleStarted
    }

    #[must_use]
    pub fn is_cycle_running(&self, id: &ConversationId) -> bool {
        self.states
            .lock()
            .expect("conversation state lock poisoned")
            .get(id)
            .is_some_and(|state| state.in_progress)
    }

    #[must_use]
    pub fn last_summary(&self, id: &ConversationId) -> Option<DateTime<Utc>> {
        self.states
            .lock()
            .expect("conversation state lock poisoned")
            .get(id)
            .and_then(|state| state.last_summary)
    }

    /// Human-readable per-conversation status: buffered message counts and
    /// last summary times.
    #[must_use]
    pub fn status_report(&self) -> String {
        let mut statuses: Vec<ConversationStatus> = {
            let states = self.states.lock().expect("conversation state lock poisoned");
            self.buffer
                .conversations()
                .into_iter()
                .map(|id| ConversationStatus {
                    buffered: self.buffer.len(&id),
                    last_summary: states.get(&id).and_then(|state| state.last_summary),
                    conversation: id,
                })
                .collect()
        };
        statuses.sort_by(|a, b| a.conversation.as_str().cmp(b.conversation.as_str()));
        render::status_report(&statuses)
    }
}

/// Resets the conversation's cycle flag on every exit path of the cycle
/// task. Must not panic: it runs during unwinding too.
struct CycleGuard {
    states: StateMap,
    id: ConversationId,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        if let Ok(mut states) = self.states.lock()
            && let Some(state) = states.get_mut(&self.id)
        {
            state.in_progress = false;
        }
    }
}

async fn run_cycle(
    id: &ConversationId,
    batch: Vec<ChatMessage>,
    template: &str,
    summarizer: &dyn Summarizer,
    notifier: &dyn Notifier,
    cycle_id: Uuid,
) {
    let transcript = format_transcript(&batch);

    let summary = match summarizer.summarize(&transcript, template).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(conversation = %id, %cycle_id, "summarizer call failed: {e}");
            return;
        }
    };

    if summary.trim().is_empty() {
        warn!(conversation = %id, %cycle_id, "summarizer produced no output, cycle abandoned");
        return;
    }

    let notice = render::summary_notice(id, Utc::now(), batch.len(), &summary);
    match notifier.deliver(&notice).await {
        Ok(()) => {
            info!(conversation = %id, %cycle_id, "summary delivered");
        }
        Err(e) => {
            error!(conversation = %id, %cycle_id, "failed to deliver summary: {e}");
        }
    }
}
