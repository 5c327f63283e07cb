use thiserror::Error;
use twitter_client::{TwitterError, STATUS_DUPLICATE, STATUS_TOO_LONG};

pub type Result<T> = std::result::Result<T, TweeterError>;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum TweeterError {
    #[error("Configuration error: {0}")]
    ConfigurationMissing(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),
}

/// Why an event was not turned into a message. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("excluded by config: {0}")]
    Excluded(String),

    #[error("unsupported event: {0}")]
    Unsupported(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// A rejected or failed publish attempt.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("status is over the length limit")]
    TooLong,

    #[error("status is a duplicate")]
    Duplicate,

    #[error("rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<TwitterError> for PublishError {
    fn from(err: TwitterError) -> Self {
        if err.has_code(STATUS_TOO_LONG) {
            return PublishError::TooLong;
        }
        if err.has_code(STATUS_DUPLICATE) {
            return PublishError::Duplicate;
        }
        match err {
            TwitterError::Api {
                status, message, ..
            } => PublishError::Rejected { status, message },
            other => PublishError::Transport(other.to_string()),
        }
    }
}
