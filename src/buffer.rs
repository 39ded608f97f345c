//! Bounded per-conversation message store.
//!
//! Appends and drains are atomic with respect to each other via the store
//! mutex; nothing here performs I/O or awaits.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::core::models::{ChatMessage, ConversationId};

/// In-memory store of one bounded FIFO queue per conversation.
///
/// Capacity overflow silently evicts the oldest message: the buffer is
/// intentionally lossy and overflow is not an error condition.
pub struct MessageBuffer {
    capacity: usize,
    conversations: Mutex<HashMap<ConversationId, VecDeque<ChatMessage>>>,
}

impl MessageBuffer {
    /// Create a store where each conversation holds at most `capacity`
    /// messages. Callers validate `capacity >= 1` at config load.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            conversations: Mutex::new(HashMap::new()),
        }
    }

    /// Append a message, evicting the oldest one first when the
    /// conversation is at capacity.
    pub fn append(&self, id: &ConversationId, message: ChatMessage) {
        let mut conversations = self.lock();
        let queue = conversations.entry(id.clone()).or_default();
        if queue.len() == self.capacity {
            queue.pop_front();
        }
        queue.push_back(message);
    }

    /// Ordered snapshot of the conversation's current contents.
    #[must_use]
    pub fn peek_all(&self, id: &ConversationId) -> Vec<ChatMessage> {
        self.lock()
            .get(id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Atomically remove and return all current contents. Messages
    /// appended afterwards start a fresh queue.
    pub fn drain_all(&self, id: &ConversationId) -> Vec<ChatMessage> {
        self.lock()
            .get_mut(id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self, id: &ConversationId) -> usize {
        self.lock().get(id).map_or(0, VecDeque::len)
    }

    #[must_use]
    pub fn is_empty(&self, id: &ConversationId) -> bool {
        self.len(id) == 0
    }

    /// All conversations that have ever buffered a message.
    #[must_use]
    pub fn conversations(&self) -> Vec<ConversationId> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ConversationId, VecDeque<ChatMessage>>> {
        self.conversations
            .lock()
            .expect("message buffer lock poisoned")
    }
}
