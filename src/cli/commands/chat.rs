//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::dispatcher::{Branch, ChatDispatcher};
use crate::session::ConversationId;
use console::style;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, mut settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.generation.model = model;
    }

    let dispatcher = ChatDispatcher::from_settings(&settings)?;
    let sessions = dispatcher.sessions();
    let conversation = ConversationId::generate();
    debug!("Started conversation {}", conversation);

    println!("\n{}", style("YouChat").bold().cyan());
    println!(
        "{}\n",
        style("Paste a YouTube link, then ask about it. 'clear' forgets the video, 'exit' quits.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            if sessions.clear(&conversation) {
                Output::info("Video transcript cleared.");
            } else {
                Output::info("No video loaded.");
            }
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let result = dispatcher.handle(&conversation, input).await;
        spinner.finish_and_clear();

        match result {
            Ok(outcome) => {
                if outcome.branch == Branch::NewVideo {
                    if let Some(ctx) = sessions.get(&conversation) {
                        Output::kv("Video", &ctx.video_id.watch_url());
                        Output::kv("Transcript", &format!("{} chars", ctx.transcript_chars()));
                    }
                }
                println!("\n{} {}\n", style("YouChat:").cyan().bold(), outcome.reply);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
