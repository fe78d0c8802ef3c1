//! OpenAI chat-completions generator.

use super::Generator;
use crate::config::GenerationSettings;
use crate::error::{Result, YouChatError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenAI text generator.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAIGenerator {
    pub fn new(settings: &GenerationSettings, api_key: &str) -> Result<Self> {
        Ok(Self {
            client: create_client(api_key, Duration::from_secs(settings.timeout_secs))?,
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| YouChatError::Generation(e.to_string()))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| YouChatError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| YouChatError::Generation(format!("OpenAI API error: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| YouChatError::Generation("Empty response from OpenAI".to_string()))?
            .clone();

        debug!("OpenAI replied with {} chars", answer.len());
        Ok(answer)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
