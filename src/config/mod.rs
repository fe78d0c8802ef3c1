//! Configuration module for YouChat.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    GeneralSettings, GenerationProvider, GenerationSettings, ServerSettings, Settings,
    TranscriptSettings,
};
