//! Request and response bodies of the HTTP API.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub video_id: String,
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User's message; may contain a YouTube link.
    #[serde(default)]
    pub message: Option<String>,
    /// Conversation to continue. Omitted means the shared default conversation.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub role: String,
    pub content: String,
}

impl ChatReply {
    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: ChatReply,
    pub conversation_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub kind: ErrorKind,
}
