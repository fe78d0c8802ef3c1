//! Transcript command: print or save a video's transcript.

use crate::cli::output::content_preview;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::YouChatError;
use crate::transcript::{TranscriptFetcher, YoutubeTranscriptFetcher};
use crate::video::VideoIdExtractor;

/// Run the transcript command.
pub async fn run_transcript(input: &str, output: Option<String>, settings: Settings) -> anyhow::Result<()> {
    preflight::check(Operation::Transcript, &settings)?;

    let video_id = VideoIdExtractor::new().parse_input(input).ok_or_else(|| {
        YouChatError::Validation(format!("Invalid YouTube video ID or URL: {}", input))
    })?;

    let fetcher = YoutubeTranscriptFetcher::new(&settings.transcript)?;

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let result = fetcher.fetch(&video_id).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, &transcript.text)?;
            Output::success(&format!("Wrote transcript to {}", path.display()));
            Output::kv("Video", &video_id.watch_url());
            Output::kv("Preview", &content_preview(&transcript.text, 120));
        }
        None => {
            println!("{}", transcript.text);
        }
    }

    Ok(())
}
