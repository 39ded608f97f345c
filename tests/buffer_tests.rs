use chrono::Utc;
use recap::buffer::MessageBuffer;
use recap::core::models::{ChatMessage, ConversationId};

fn msg(author: &str, text: &str) -> ChatMessage {
    ChatMessage::new(author, text, Utc::now())
}

// Tests for the bounded per-conversation buffer: capacity handling,
// FIFO eviction, and drain semantics.

#[test]
fn test_capacity_evicts_oldest_first() {
    let buffer = MessageBuffer::new(3);
    let id = ConversationId::from("g1");

    for i in 0..5 {
        buffer.append(&id, msg("alice", &format!("message {i}")));
    }

    let contents = buffer.peek_all(&id);
    assert_eq!(contents.len(), 3);
    // Oldest entries (0 and 1) were evicted first
    assert_eq!(contents[0].text, "message 2");
    assert_eq!(contents[1].text, "message 3");
    assert_eq!(contents[2].text, "message 4");
}

#[test]
fn test_size_never_exceeds_capacity() {
    let buffer = MessageBuffer::new(10);
    let id = ConversationId::from("g1");

    for i in 0..100 {
        buffer.append(&id, msg("bob", &format!("message {i}")));
        assert!(buffer.len(&id) <= 10, "buffer exceeded capacity at append {i}");
    }
    assert_eq!(buffer.len(&id), 10);
}

#[test]
fn test_peek_does_not_mutate() {
    let buffer = MessageBuffer::new(5);
    let id = ConversationId::from("g1");

    buffer.append(&id, msg("alice", "hello"));
    buffer.append(&id, msg("bob", "hi"));

    let first = buffer.peek_all(&id);
    let second = buffer.peek_all(&id);
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(buffer.len(&id), 2);
}

#[test]
fn test_drain_returns_all_in_order_and_empties() {
    let buffer = MessageBuffer::new(5);
    let id = ConversationId::from("g1");

    buffer.append(&id, msg("alice", "first"));
    buffer.append(&id, msg("bob", "second"));
    buffer.append(&id, msg("carol", "third"));

    let drained = buffer.drain_all(&id);
    assert_eq!(drained.len(), 3);
    assert_eq!(drained[0].text, "first");
    assert_eq!(drained[1].text, "second");
    assert_eq!(drained[2].text, "third");

    assert!(buffer.is_empty(&id));
    assert!(buffer.peek_all(&id).is_empty());

    // A fresh append after a drain starts a new queue
    buffer.append(&id, msg("alice", "fourth"));
    assert_eq!(buffer.peek_all(&id)[0].text, "fourth");
}

#[test]
fn test_drain_on_unknown_conversation_is_empty() {
    let buffer = MessageBuffer::new(5);
    let id = ConversationId::from("never-seen");

    assert!(buffer.drain_all(&id).is_empty());
    assert!(buffer.peek_all(&id).is_empty());
    assert_eq!(buffer.len(&id), 0);
}

#[test]
fn test_conversations_are_isolated() {
    let buffer = MessageBuffer::new(5);
    let g1 = ConversationId::from("g1");
    let g2 = ConversationId::from("g2");

    buffer.append(&g1, msg("alice", "for g1"));
    buffer.append(&g2, msg("bob", "for g2"));
    buffer.append(&g2, msg("carol", "also for g2"));

    let drained = buffer.drain_all(&g1);
    assert_eq!(drained.len(), 1);
    assert_eq!(buffer.len(&g2), 2, "draining g1 must not touch g2");
}

#[test]
fn test_conversations_lists_every_seen_id() {
    let buffer = MessageBuffer::new(5);
    buffer.append(&ConversationId::from("g1"), msg("alice", "one"));
    buffer.append(&ConversationId::from("g2"), msg("bob", "two"));

    let mut ids: Vec<String> = buffer
        .conversations()
        .into_iter()
        .map(|id| id.as_str().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["g1", "g2"]);
}
