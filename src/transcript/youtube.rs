//! YouTube transcript fetcher backed by `yt-transcript-rs`.

use super::{join_fragments, Transcript, TranscriptFetcher};
use crate::config::TranscriptSettings;
use crate::error::{Result, YouChatError};
use crate::openai::http_client;
use crate::video::VideoId;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches caption tracks straight from YouTube.
#[derive(Clone)]
pub struct YoutubeTranscriptFetcher {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
    preserve_formatting: bool,
    timeout: Duration,
}

impl YoutubeTranscriptFetcher {
    pub fn new(settings: &TranscriptSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = http_client(timeout)?;
        let api = YouTubeTranscriptApi::new(None, None, Some(client)).map_err(|e| {
            YouChatError::Config(format!("Failed to initialize transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            languages: settings.languages.clone(),
            preserve_formatting: settings.preserve_formatting,
            timeout,
        })
    }

    /// Timeout applied to every transcript request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let fetched = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, self.preserve_formatting)
            .await
            .map_err(|e| YouChatError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                message: e.to_string(),
            })?;

        debug!("Received {} caption fragments", fetched.snippets.len());

        let text = join_fragments(fetched.snippets.iter().map(|s| s.text.as_str()));
        info!("Fetched transcript ({} chars)", text.chars().count());

        Ok(Transcript {
            video_id: video_id.clone(),
            text,
        })
    }
}
