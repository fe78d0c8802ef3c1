//! Per-conversation transcript store.
//!
//! Each conversation holds at most one transcript, replaced whenever a new
//! video is requested in that conversation. Nothing is persisted.

use crate::transcript::Transcript;
use crate::video::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Key naming a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Conversation used by callers that do not name one.
    pub const DEFAULT: &'static str = "default";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random conversation ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active video of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub video_id: VideoId,
    pub transcript: String,
    pub fetched_at: DateTime<Utc>,
}

impl From<Transcript> for ConversationContext {
    fn from(transcript: Transcript) -> Self {
        Self {
            video_id: transcript.video_id,
            transcript: transcript.text,
            fetched_at: Utc::now(),
        }
    }
}

impl ConversationContext {
    /// Transcript length in characters.
    pub fn transcript_chars(&self) -> usize {
        self.transcript.chars().count()
    }
}

/// In-memory session store keyed by conversation.
pub struct SessionStore {
    conversations: RwLock<HashMap<ConversationId, ConversationContext>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Current context of a conversation.
    pub fn get(&self, id: &ConversationId) -> Option<ConversationContext> {
        let conversations = self.conversations.read().unwrap_or_else(PoisonError::into_inner);
        conversations.get(id).cloned()
    }

    /// Current transcript text of a conversation.
    pub fn transcript(&self, id: &ConversationId) -> Option<String> {
        let conversations = self.conversations.read().unwrap_or_else(PoisonError::into_inner);
        conversations.get(id).map(|c| c.transcript.clone())
    }

    /// Install a new context, returning the one it displaced.
    pub fn replace(
        &self,
        id: ConversationId,
        context: ConversationContext,
    ) -> Option<ConversationContext> {
        let mut conversations = self.conversations.write().unwrap_or_else(PoisonError::into_inner);
        conversations.insert(id, context)
    }

    /// Drop a conversation's context. Returns whether one existed.
    pub fn clear(&self, id: &ConversationId) -> bool {
        let mut conversations = self.conversations.write().unwrap_or_else(PoisonError::into_inner);
        conversations.remove(id).is_some()
    }

    /// Number of conversations holding a transcript.
    pub fn len(&self) -> usize {
        self.conversations.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
