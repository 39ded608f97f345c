use std::collections::HashSet;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use chrono::Duration;
use url::Url;

use crate::errors::RecapError;
use crate::prompt::{DEFAULT_SUMMARY_PROMPT, MESSAGES_PLACEHOLDER};

pub const DEFAULT_AI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MESSAGE_THRESHOLD: usize = 50;
pub const DEFAULT_WINDOW_HOURS: i64 = 2;
pub const DEFAULT_BUFFER_CAPACITY: usize = 1000;

/// Service configuration, read from the environment once at startup and
/// validated at load. Missing credentials are not a startup error: they
/// keep the affected collaborator unconfigured and cycles are skipped
/// until the credentials appear.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub message_threshold: usize,
    /// Lookback and cool-down window for trigger evaluation.
    pub window: Duration,
    pub buffer_capacity: usize,
    /// Conversations to watch; empty means all.
    pub allowed_conversations: HashSet<String>,
    pub summary_prompt: String,
    pub ai_api_url: String,
    pub ai_api_key: Option<String>,
    pub ai_model: String,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, RecapError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. `from_env`
    /// delegates here; tests inject maps instead of touching the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RecapError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let message_threshold: usize =
            parse_or(&get, "RECAP_MESSAGE_THRESHOLD", DEFAULT_MESSAGE_THRESHOLD)?;
        if message_threshold == 0 {
            return Err(RecapError::Config(
                "RECAP_MESSAGE_THRESHOLD: must be at least 1".to_string(),
            ));
        }

        let window_hours: i64 = parse_or(&get, "RECAP_WINDOW_HOURS", DEFAULT_WINDOW_HOURS)?;
        if window_hours < 1 {
            return Err(RecapError::Config(
                "RECAP_WINDOW_HOURS: must be at least 1".to_string(),
            ));
        }

        let buffer_capacity: usize =
            parse_or(&get, "RECAP_BUFFER_CAPACITY", DEFAULT_BUFFER_CAPACITY)?;
        if buffer_capacity == 0 {
            return Err(RecapError::Config(
                "RECAP_BUFFER_CAPACITY: must be at least 1".to_string(),
            ));
        }

        let allowed_conversations: HashSet<String> = get("RECAP_TARGET_GROUPS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|group| !group.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let summary_prompt =
            get("RECAP_SUMMARY_PROMPT").unwrap_or_else(|| DEFAULT_SUMMARY_PROMPT.to_string());
        if !summary_prompt.contains(MESSAGES_PLACEHOLDER) {
            return Err(RecapError::Config(format!(
                "RECAP_SUMMARY_PROMPT: template must contain the {MESSAGES_PLACEHOLDER} placeholder"
            )));
        }

        let ai_api_url = get("RECAP_AI_API_URL").unwrap_or_else(|| DEFAULT_AI_API_URL.to_string());
        Url::parse(&ai_api_url)
            .map_err(|e| RecapError::Config(format!("RECAP_AI_API_URL: {e}")))?;

        Ok(Self {
            message_threshold,
            window: Duration::hours(window_hours),
            buffer_capacity,
            allowed_conversations,
            summary_prompt,
            ai_api_url,
            ai_api_key: get("RECAP_AI_API_KEY"),
            ai_model: get("RECAP_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            telegram_bot_token: get("RECAP_TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: get("RECAP_TELEGRAM_CHAT_ID"),
        })
    }
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, RecapError>
where
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| RecapError::Config(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
