use thiserror::Error;

use crate::types::ApiErrorDetail;

pub type Result<T> = std::result::Result<T, TwitterError>;

/// Error code returned when a status exceeds the length limit.
pub const STATUS_TOO_LONG: u32 = 186;

/// Error code returned when a status duplicates a recent one.
pub const STATUS_DUPLICATE: u32 = 187;

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Twitter API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<ApiErrorDetail>,
    },
}

impl TwitterError {
    /// True if the API rejected the request with the given error code.
    pub fn has_code(&self, code: u32) -> bool {
        match self {
            Self::Api { errors, .. } => errors.iter().any(|e| e.code == code),
            _ => false,
        }
    }
}
