//! Chat message routing.
//!
//! Decides per message whether it loads a new video, asks about the current
//! one, or is a general question, and calls the right collaborators.

use crate::config::Settings;
use crate::error::{Result, YouChatError};
use crate::generation::{compose_prompt, create_generator, Generator};
use crate::session::{ConversationContext, ConversationId, SessionStore};
use crate::transcript::{TranscriptFetcher, YoutubeTranscriptFetcher};
use crate::video::VideoIdExtractor;
use std::sync::Arc;
use tracing::{info, instrument};

/// Reply sent after a video's transcript has been loaded.
pub const TRANSCRIPT_ACK: &str = "I've retrieved the transcript. What would you like to ask?";

/// How a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The message carried a video link; its transcript was loaded.
    NewVideo,
    /// Answered with the conversation's transcript as context.
    FollowUp,
    /// Answered without context.
    General,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Branch::NewVideo => write!(f, "new_video"),
            Branch::FollowUp => write!(f, "follow_up"),
            Branch::General => write!(f, "general"),
        }
    }
}

/// Result of handling one chat message.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub branch: Branch,
    pub reply: String,
    pub conversation_id: ConversationId,
}

/// Routes chat messages between the transcript fetcher, session store and generator.
pub struct ChatDispatcher {
    extractor: VideoIdExtractor,
    fetcher: Arc<dyn TranscriptFetcher>,
    generator: Arc<dyn Generator>,
    sessions: Arc<SessionStore>,
}

impl ChatDispatcher {
    /// Build a dispatcher from settings.
    ///
    /// Fails when the generation API key is missing from the environment.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.api_key()?;
        let fetcher = Arc::new(YoutubeTranscriptFetcher::new(&settings.transcript)?);
        let generator = create_generator(&settings.generation, &api_key)?;

        info!(
            "Using {} ({}) for generation",
            settings.generation.provider, settings.generation.model
        );

        Ok(Self::with_components(
            fetcher,
            generator,
            Arc::new(SessionStore::new()),
        ))
    }

    /// Create a dispatcher with custom components.
    pub fn with_components(
        fetcher: Arc<dyn TranscriptFetcher>,
        generator: Arc<dyn Generator>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            extractor: VideoIdExtractor::new(),
            fetcher,
            generator,
            sessions,
        }
    }

    /// Get the transcript fetcher.
    pub fn fetcher(&self) -> Arc<dyn TranscriptFetcher> {
        self.fetcher.clone()
    }

    /// Get the session store.
    pub fn sessions(&self) -> Arc<SessionStore> {
        self.sessions.clone()
    }

    /// Handle one chat message within a conversation.
    #[instrument(skip(self, message), fields(conversation = %conversation))]
    pub async fn handle(&self, conversation: &ConversationId, message: &str) -> Result<ChatOutcome> {
        if message.trim().is_empty() {
            return Err(YouChatError::Validation("Message is required".to_string()));
        }

        if let Some(video_id) = self.extractor.extract(message) {
            info!("Loading transcript for {}", video_id);
            // Only replace the session entry once the fetch has succeeded
            let transcript = self.fetcher.fetch(&video_id).await?;
            self.sessions
                .replace(conversation.clone(), ConversationContext::from(transcript));

            return Ok(self.outcome(conversation, Branch::NewVideo, TRANSCRIPT_ACK.to_string()));
        }

        // An empty transcript counts as no video
        let context = self
            .sessions
            .transcript(conversation)
            .filter(|t| !t.is_empty());
        let branch = match context {
            Some(_) => Branch::FollowUp,
            None => Branch::General,
        };
        info!("Answering as {}", branch);

        let prompt = compose_prompt(message, context.as_deref());
        let reply = self.generator.generate(&prompt).await?;

        Ok(self.outcome(conversation, branch, reply))
    }

    fn outcome(&self, conversation: &ConversationId, branch: Branch, reply: String) -> ChatOutcome {
        ChatOutcome {
            branch,
            reply,
            conversation_id: conversation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Transcript;
    use crate::video::VideoId;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockFetcher {
        transcripts: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                transcripts: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TranscriptFetcher for MockFetcher {
        async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
            self.calls.lock().unwrap().push(video_id.to_string());
            match self.transcripts.get(video_id.as_str()) {
                Some(text) => Ok(Transcript {
                    video_id: video_id.clone(),
                    text: text.clone(),
                }),
                None => Err(YouChatError::TranscriptUnavailable {
                    video_id: video_id.to_string(),
                    message: "Subtitles are disabled for this video".to_string(),
                }),
            }
        }
    }

    struct MockGenerator {
        prompts: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    impl MockGenerator {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_with: Some(msg.to_string()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Generator for MockGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(msg) = &self.fail_with {
                return Err(YouChatError::Generation(msg.clone()));
            }
            Ok(format!("answer #{}", self.prompts.lock().unwrap().len()))
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn dispatcher(
        fetcher: Arc<MockFetcher>,
        generator: Arc<MockGenerator>,
    ) -> ChatDispatcher {
        ChatDispatcher::with_components(fetcher, generator, Arc::new(SessionStore::new()))
    }

    #[tokio::test]
    async fn test_video_then_follow_up() {
        let fetcher = Arc::new(MockFetcher::new(&[("dQw4w9WgXcQ", "Hello world")]));
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(fetcher.clone(), generator.clone());
        let conv = ConversationId::default();

        let first = dispatcher
            .handle(&conv, "https://youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(first.branch, Branch::NewVideo);
        assert_eq!(first.reply, TRANSCRIPT_ACK);
        assert!(generator.prompts().is_empty());

        let second = dispatcher.handle(&conv, "what is this about?").await.unwrap();
        assert_eq!(second.branch, Branch::FollowUp);
        assert_eq!(second.reply, "answer #1");
        assert_eq!(generator.prompts(), vec!["Hello world\n\nwhat is this about?"]);
        assert_eq!(*fetcher.calls.lock().unwrap(), vec!["dQw4w9WgXcQ"]);
    }

    #[tokio::test]
    async fn test_general_question_uses_bare_prompt() {
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(Arc::new(MockFetcher::new(&[])), generator.clone());

        let outcome = dispatcher
            .handle(&ConversationId::default(), "Tell me a joke")
            .await
            .unwrap();

        assert_eq!(outcome.branch, Branch::General);
        assert_eq!(generator.prompts(), vec!["Tell me a joke"]);
    }

    #[tokio::test]
    async fn test_empty_message_rejected_without_calls() {
        let fetcher = Arc::new(MockFetcher::new(&[]));
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(fetcher.clone(), generator.clone());

        for message in ["", "   \n"] {
            let err = dispatcher
                .handle(&ConversationId::default(), message)
                .await
                .unwrap_err();
            assert!(matches!(err, YouChatError::Validation(_)));
        }

        assert!(fetcher.calls.lock().unwrap().is_empty());
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_new_video_replaces_old_transcript() {
        let fetcher = Arc::new(MockFetcher::new(&[
            ("AAAAAAAAAAA", "transcript A"),
            ("BBBBBBBBBBB", "transcript B"),
        ]));
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(fetcher, generator.clone());
        let conv = ConversationId::default();

        dispatcher.handle(&conv, "https://youtu.be/AAAAAAAAAAA").await.unwrap();
        dispatcher.handle(&conv, "https://youtu.be/BBBBBBBBBBB").await.unwrap();
        dispatcher.handle(&conv, "summarize").await.unwrap();

        let prompts = generator.prompts();
        assert_eq!(prompts, vec!["transcript B\n\nsummarize"]);
        assert!(!prompts[0].contains("transcript A"));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_transcript() {
        let fetcher = Arc::new(MockFetcher::new(&[("AAAAAAAAAAA", "transcript A")]));
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(fetcher, generator.clone());
        let conv = ConversationId::default();

        dispatcher.handle(&conv, "https://youtu.be/AAAAAAAAAAA").await.unwrap();
        let err = dispatcher
            .handle(&conv, "https://youtu.be/CCCCCCCCCCC")
            .await
            .unwrap_err();
        assert!(matches!(err, YouChatError::TranscriptUnavailable { .. }));

        dispatcher.handle(&conv, "and now?").await.unwrap();
        assert_eq!(generator.prompts(), vec!["transcript A\n\nand now?"]);
    }

    #[tokio::test]
    async fn test_conversations_do_not_share_transcripts() {
        let fetcher = Arc::new(MockFetcher::new(&[("AAAAAAAAAAA", "transcript A")]));
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(fetcher, generator.clone());

        let alice = ConversationId::new("alice");
        let bob = ConversationId::new("bob");

        dispatcher.handle(&alice, "https://youtu.be/AAAAAAAAAAA").await.unwrap();
        let outcome = dispatcher.handle(&bob, "what is this about?").await.unwrap();

        assert_eq!(outcome.branch, Branch::General);
        assert_eq!(outcome.conversation_id, bob);
        assert_eq!(generator.prompts(), vec!["what is this about?"]);
    }

    #[tokio::test]
    async fn test_empty_transcript_falls_back_to_general() {
        let fetcher = Arc::new(MockFetcher::new(&[("dQw4w9WgXcQ", "")]));
        let generator = Arc::new(MockGenerator::new());
        let dispatcher = dispatcher(fetcher, generator.clone());
        let conv = ConversationId::default();

        let first = dispatcher
            .handle(&conv, "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(first.branch, Branch::NewVideo);

        let second = dispatcher.handle(&conv, "hi").await.unwrap();
        assert_eq!(second.branch, Branch::General);
        assert_eq!(generator.prompts(), vec!["hi"]);
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let generator = Arc::new(MockGenerator::failing("quota exceeded"));
        let dispatcher = dispatcher(Arc::new(MockFetcher::new(&[])), generator);

        let err = dispatcher
            .handle(&ConversationId::default(), "hello")
            .await
            .unwrap_err();

        match err {
            YouChatError::Generation(msg) => assert_eq!(msg, "quota exceeded"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
