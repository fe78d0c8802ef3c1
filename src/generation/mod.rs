//! Generative text providers.
//!
//! The chat dispatcher only sees the [`Generator`] trait; which API answers is
//! a configuration choice.

mod gemini;
mod openai;

pub use gemini::GeminiGenerator;
pub use openai::OpenAIGenerator;

use crate::config::{GenerationProvider, GenerationSettings};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for text generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a reply for a complete prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model name used for generation.
    fn model(&self) -> &str;
}

/// Build the prompt sent to the model.
///
/// With context the prompt is the context, a blank line, then the question.
/// Empty context is treated as none.
pub fn compose_prompt(question: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.is_empty()) {
        Some(context) => format!("{}\n\n{}", context, question),
        None => question.to_string(),
    }
}

/// Create the configured generator.
pub fn create_generator(settings: &GenerationSettings, api_key: &str) -> Result<Arc<dyn Generator>> {
    let generator: Arc<dyn Generator> = match settings.provider {
        GenerationProvider::Gemini => Arc::new(GeminiGenerator::new(settings, api_key)?),
        GenerationProvider::OpenAI => Arc::new(OpenAIGenerator::new(settings, api_key)?),
    };
    Ok(generator)
}
