//! edcare - simulated learning and child-care assistants
//!
#![doc = "Main entry point for the edcare application."]

use anyhow::Result;

use edcare::cli::{Cli, Commands};
use edcare::commands;
use edcare::config::Config;
use edcare::logging::{bootstrap_subscriber, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration; warnings go to stderr until logging is configured
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        Config::load(config_path, &cli)
    })?;

    // Validate configuration
    config.validate()?;

    init_logging(&config.logging)?;
    tracing::debug!(path = config_path, "Configuration loaded");

    // Execute command
    match cli.command {
        Commands::Chat {
            mode,
            subject,
            age_group,
            seed,
        } => {
            if let Some(m) = &mode {
                tracing::debug!("Using mode override: {}", m);
            }
            commands::chat::run_chat(config, mode, subject, age_group, seed).await?;
            Ok(())
        }
        Commands::Ask {
            mode,
            subject,
            age_group,
            seed,
            json,
            text,
        } => {
            commands::ask::run_ask(config, mode, subject, age_group, seed, json, text).await?;
            Ok(())
        }
        Commands::Symptoms { ids, json } => {
            commands::symptoms::run_symptoms(ids, json)?;
            Ok(())
        }
        Commands::Emotion { frame, seed, json } => {
            tracing::debug!("Reading frame from: {}", frame.display());
            commands::emotion::run_emotion(&config, &frame, seed, json).await?;
            Ok(())
        }
    }
}
