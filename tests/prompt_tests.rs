use recap::ai::estimate_tokens;
use recap::prompt::{DEFAULT_SUMMARY_PROMPT, MESSAGES_PLACEHOLDER, render_prompt};

#[test]
fn test_render_prompt_substitutes_placeholder() {
    let template = "Summarize this:\n\n{messages}\n\nBe brief.";
    let rendered = render_prompt(template, "[12:00] alice: hi");

    assert_eq!(
        rendered,
        "Summarize this:\n\n[12:00] alice: hi\n\nBe brief."
    );
    assert!(!rendered.contains(MESSAGES_PLACEHOLDER));
}

#[test]
fn test_render_prompt_without_placeholder_appends_transcript() {
    let rendered = render_prompt("Summarize the chat.", "[12:00] alice: hi");
    assert_eq!(rendered, "Summarize the chat.\n\n[12:00] alice: hi");
}

#[test]
fn test_default_prompt_contains_placeholder() {
    assert!(DEFAULT_SUMMARY_PROMPT.contains(MESSAGES_PLACEHOLDER));
}

// Tests for the utility function estimate_tokens
#[test]
fn test_estimate_tokens() {
    // Empty string still counts as at least one token
    assert_eq!(estimate_tokens(""), 1);

    // Short English text, approx 4 chars per token
    assert_eq!(estimate_tokens("hello"), 2);

    let text = "This is a longer sentence that should be approximately twelve tokens.";
    assert_eq!(estimate_tokens(text), text.chars().count() / 4 + 1);
}
