//! YouChat - chat about YouTube videos
//!
//! A small service that pulls a YouTube video's transcript when a link shows up
//! in a chat message, then answers follow-up questions about it with an LLM.
//!
//! # Overview
//!
//! YouChat lets you:
//! - Paste a YouTube link into a chat and have its transcript fetched
//! - Ask follow-up questions answered from that transcript
//! - Ask general questions when no video is loaded
//! - Fetch raw transcripts over HTTP or from the command line
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `video` - YouTube video ID extraction
//! - `transcript` - Transcript retrieval
//! - `generation` - LLM providers (Gemini, OpenAI)
//! - `session` - Per-conversation transcript store
//! - `dispatcher` - Chat message routing
//! - `api` - HTTP endpoints
//!
//! # Example
//!
//! ```rust,no_run
//! use youchat::config::Settings;
//! use youchat::dispatcher::ChatDispatcher;
//! use youchat::session::ConversationId;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let dispatcher = ChatDispatcher::from_settings(&settings)?;
//!     let conversation = ConversationId::default();
//!
//!     dispatcher
//!         .handle(&conversation, "https://youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     let outcome = dispatcher.handle(&conversation, "What is this about?").await?;
//!     println!("{}", outcome.reply);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod generation;
pub mod openai;
pub mod session;
pub mod transcript;
pub mod video;

pub use error::{ErrorKind, Result, YouChatError};
