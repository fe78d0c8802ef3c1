//! YouChat CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use youchat::cli::{commands, Cli, Commands};
use youchat::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load configuration
    let config_path = Settings::config_path(cli.config.as_deref().map(PathBuf::from).as_ref());
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging; -v flags override the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("youchat={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host, port, settings).await?;
        }

        Commands::Chat { model } => {
            commands::run_chat(model, settings).await?;
        }

        Commands::Transcript { input, output } => {
            commands::run_transcript(&input, output, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &config_path, settings)?;
        }
    }

    Ok(())
}
