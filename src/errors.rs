use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecapError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("summarizer request failed: {0}")]
    Summarizer(String),

    #[error("failed to deliver notification: {0}")]
    Notifier(String),

    #[error("failed to send HTTP request: {0}")]
    Http(String),
}

impl From<reqwest::Error> for RecapError {
    fn from(error: reqwest::Error) -> Self {
        RecapError::Http(error.to_string())
    }
}

impl From<url::ParseError> for RecapError {
    fn from(error: url::ParseError) -> Self {
        RecapError::Config(error.to_string())
    }
}
