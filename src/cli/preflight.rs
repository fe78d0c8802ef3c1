//! Pre-flight checks before starting long-running commands.
//!
//! Validates that required configuration is available so the server or chat
//! session fails at startup instead of on the first request.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving and chatting call the generative API.
    Generate,
    /// Fetching a transcript needs no credentials.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Generate => {
            settings.api_key()?;
        }
        Operation::Transcript => {}
    }
    Ok(())
}
