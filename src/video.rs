//! YouTube video ID extraction from free-form text.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An 11-character YouTube video identifier.
///
/// Only the shape is checked. Whether the video exists or has captions is
/// discovered when the transcript is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap a caller-supplied ID without checking its shape.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Finds YouTube video IDs in chat messages and CLI input.
#[derive(Debug, Clone)]
pub struct VideoIdExtractor {
    message_regex: Regex,
    bare_regex: Regex,
}

impl VideoIdExtractor {
    pub fn new() -> Self {
        // A `v=` query parameter or any path segment, followed by 11 ID characters
        let message_regex = Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Invalid regex");
        let bare_regex = Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("Invalid regex");

        Self {
            message_regex,
            bare_regex,
        }
    }

    /// Extract the first video ID embedded in a URL anywhere in `text`.
    pub fn extract(&self, text: &str) -> Option<VideoId> {
        self.message_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
    }

    /// Accept either a URL or a bare 11-character ID.
    pub fn parse_input(&self, input: &str) -> Option<VideoId> {
        let input = input.trim();
        if self.bare_regex.is_match(input) {
            return Some(VideoId(input.to_string()));
        }
        self.extract(input)
    }
}

impl Default for VideoIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the first video ID from `text` with a fresh extractor.
pub fn extract_video_id(text: &str) -> Option<VideoId> {
    VideoIdExtractor::new().extract(text)
}
