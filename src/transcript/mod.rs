//! Transcript retrieval.
//!
//! Provides a trait-based interface over transcript sources so the chat
//! dispatcher can be exercised without network access.

mod youtube;

pub use youtube::YoutubeTranscriptFetcher;

use crate::error::Result;
use crate::video::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Caption text for one video, stripped of timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub text: String,
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the full transcript of a video.
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript>;
}

/// Join caption fragments with single spaces.
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .map(|f| f.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
