use chrono::{TimeZone, Utc};

use recap::core::models::{ChatMessage, ConversationId};
use recap::prompt::{MAX_TRANSCRIPT_CHARS, format_transcript};
use recap::telegram::render::{ConversationStatus, status_report, summary_notice, test_notice};

/// Tests for the transcript and outbound notification formatting.
/// These verify the rendered text stays consistent during refactoring.

#[test]
fn test_transcript_line_format() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let messages = vec![ChatMessage::new("alice", "hello there", ts)];

    assert_eq!(
        format_transcript(&messages),
        "[2024-05-01 12:00:00] alice: hello there"
    );
}

#[test]
fn test_transcript_joins_chronologically_with_newlines() {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 30).unwrap();
    let messages = vec![
        ChatMessage::new("alice", "first", t0),
        ChatMessage::new("bob", "second", t1),
    ];

    let transcript = format_transcript(&messages);
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("alice: first"));
    assert!(lines[1].contains("bob: second"));
}

#[test]
fn test_transcript_over_budget_drops_oldest_lines() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let long_text = "x".repeat(MAX_TRANSCRIPT_CHARS / 4);
    let messages: Vec<ChatMessage> = (0..8)
        .map(|i| ChatMessage::new(format!("user{i}"), long_text.clone(), ts))
        .collect();

    let transcript = format_transcript(&messages);
    assert!(transcript.chars().count() <= MAX_TRANSCRIPT_CHARS);
    assert!(
        !transcript.contains("user0:"),
        "oldest line is dropped first"
    );
    assert!(
        transcript.contains("user7:"),
        "newest line is always retained"
    );
}

#[test]
fn test_summary_notice_contains_all_fields() {
    let id = ConversationId::from("g1");
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap();

    let notice = summary_notice(&id, at, 42, "They argued about tabs and spaces.");

    assert!(notice.contains("Summary for group g1"));
    assert!(notice.contains("Time: 2024-05-01 15:30:00"));
    assert!(notice.contains("Messages: 42"));
    assert!(notice.contains("They argued about tabs and spaces."));
}

#[test]
fn test_status_report_lists_conversations() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let statuses = vec![
        ConversationStatus {
            conversation: ConversationId::from("g1"),
            buffered: 12,
            last_summary: Some(at),
        },
        ConversationStatus {
            conversation: ConversationId::from("g2"),
            buffered: 0,
            last_summary: None,
        },
    ];

    let report = status_report(&statuses);
    assert!(report.contains("Group g1:"));
    assert!(report.contains("buffered messages: 12"));
    assert!(report.contains("last summary: 2024-05-01 09:00:00"));
    assert!(report.contains("Group g2:"));
    assert!(report.contains("last summary: never"));
}

#[test]
fn test_status_report_handles_empty_state() {
    let report = status_report(&[]);
    assert!(report.contains("no buffered conversations"));
}

#[test]
fn test_test_notice_mentions_time() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let notice = test_notice(at);
    assert!(notice.contains("Test message"));
    assert!(notice.contains("2024-05-01 09:00:00"));
}
