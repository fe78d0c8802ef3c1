//! Error types for YouChat.

use serde::Serialize;
use thiserror::Error;

/// Library-level error type for YouChat operations.
#[derive(Error, Debug)]
pub enum YouChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Transcript unavailable for {video_id}: {message}")]
    TranscriptUnavailable { video_id: String, message: String },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Closed set of failure categories reported to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The request itself was malformed.
    Validation,
    /// The transcript collaborator failed.
    Retrieval,
    /// The generative collaborator failed.
    Generation,
    /// Anything else (config, IO, serialization).
    Internal,
}

impl YouChatError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            YouChatError::Validation(_) => ErrorKind::Validation,
            YouChatError::TranscriptUnavailable { .. } => ErrorKind::Retrieval,
            YouChatError::Generation(_) => ErrorKind::Generation,
            _ => ErrorKind::Internal,
        }
    }

    /// The collaborator's own message, without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            YouChatError::Validation(msg)
            | YouChatError::Generation(msg)
            | YouChatError::Config(msg) => msg.clone(),
            YouChatError::TranscriptUnavailable { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for YouChat operations.
pub type Result<T> = std::result::Result<T, YouChatError>;
