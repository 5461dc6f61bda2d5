//! Command-line interface definition for edcare
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat plus one-shot ask, symptom and
//! emotion commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// edcare - simulated learning and child-care assistants
///
/// Chat with an assistant, ask a one-off question, check symptoms
/// or read the emotion on a camera frame.
#[derive(Parser, Debug, Clone)]
#[command(name = "edcare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for edcare
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Assistant mode (chat, math, tutor, education, health, symptoms)
        #[arg(short, long)]
        mode: Option<String>,

        /// Tutor subject (math, science, english, history, geography)
        #[arg(long)]
        subject: Option<String>,

        /// Tutor age group (preschool, elementary, middle, high)
        #[arg(long)]
        age_group: Option<String>,

        /// Seed for reproducible replies
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Submit one message and print the reply
    Ask {
        /// Assistant mode (chat, math, tutor, education, health, symptoms)
        #[arg(short, long)]
        mode: Option<String>,

        /// Tutor subject (math, science, english, history, geography)
        #[arg(long)]
        subject: Option<String>,

        /// Tutor age group (preschool, elementary, middle, high)
        #[arg(long)]
        age_group: Option<String>,

        /// Seed for reproducible replies
        #[arg(long)]
        seed: Option<u64>,

        /// Print the whole conversation as JSON
        #[arg(long)]
        json: bool,

        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Recommend care for a set of symptoms
    Symptoms {
        /// Symptom ids (fever, cough, headache, sore-throat, fatigue,
        /// runny-nose, body-ache, nausea)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect the emotion shown in a still camera frame
    Emotion {
        /// Image file standing in for the camera
        #[arg(short, long)]
        frame: PathBuf,

        /// Seed for reproducible readings
        #[arg(long)]
        seed: Option<u64>,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat {
                mode: None,
                subject: None,
                age_group: None,
                seed: None,
            },
        }
    }
}
