//! Assistant mode types
//!
//! Each mode selects which simulated assistant answers submissions in a
//! session:
//! - Chat: general educational chat assistant
//! - Math: step-by-step math solver
//! - Tutor: subject and age aware tutor
//! - Education / Health: guidance for parents and carers
//! - Symptoms: rule-based symptom checker

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::Config;

/// Assistant mode for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    /// General chat assistant
    Chat,
    /// Math problem solver
    Math,
    /// Personalized tutor
    Tutor,
    /// Educational guidance
    Education,
    /// Health and wellbeing guidance
    Health,
    /// Symptom checker
    Symptoms,
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "CHAT"),
            Self::Math => write!(f, "MATH"),
            Self::Tutor => write!(f, "TUTOR"),
            Self::Education => write!(f, "EDUCATION"),
            Self::Health => write!(f, "HEALTH"),
            Self::Symptoms => write!(f, "SYMPTOMS"),
        }
    }
}

impl AssistantMode {
    /// All modes, in the order they are listed to users
    pub const ALL: [AssistantMode; 6] = [
        Self::Chat,
        Self::Math,
        Self::Tutor,
        Self::Education,
        Self::Health,
        Self::Symptoms,
    ];

    /// Parse an assistant mode from a string
    ///
    /// # Arguments
    ///
    /// * `s` - Mode name, case-insensitive ("chat", "math", "tutor", ...)
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::assistant_mode::AssistantMode;
    ///
    /// let mode = AssistantMode::parse_str("Tutor").unwrap();
    /// assert_eq!(mode, AssistantMode::Tutor);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "chat" | "assistant" => Ok(Self::Chat),
            "math" => Ok(Self::Math),
            "tutor" => Ok(Self::Tutor),
            "education" | "learning" => Ok(Self::Education),
            "health" | "wellbeing" => Ok(Self::Health),
            "symptoms" | "symptom" => Ok(Self::Symptoms),
            other => Err(format!("Unknown assistant mode: {}", other)),
        }
    }

    /// Lowercase identifier used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Math => "math",
            Self::Tutor => "tutor",
            Self::Education => "education",
            Self::Health => "health",
            Self::Symptoms => "symptoms",
        }
    }

    /// Get a user-friendly description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            Self::Chat => "Ask educational questions or get help with various topics",
            Self::Math => "Step-by-step solutions to math problems",
            Self::Tutor => "Personalized learning help by subject and age group",
            Self::Education => "Learning recommendations for a topic",
            Self::Health => "Wellbeing guidance for a health question",
            Self::Symptoms => "Care recommendations from a list of symptoms",
        }
    }

    /// Simulated processing latency for this mode
    ///
    /// The chat assistant uses `session.reply_delay_ms`; every other tool
    /// uses `tools.reply_delay_ms`.
    pub fn reply_delay(&self, config: &Config) -> Duration {
        let millis = match self {
            Self::Chat => config.session.reply_delay_ms,
            _ => config.tools.reply_delay_ms,
        };
        Duration::from_millis(millis)
    }

    /// Get a colored tag representation of this mode
    pub fn colored_tag(&self) -> String {
        let label = self.to_string();
        match self {
            Self::Chat => format!("[{}]", label.cyan()),
            Self::Math => format!("[{}]", label.purple()),
            Self::Tutor => format!("[{}]", label.green()),
            Self::Education => format!("[{}]", label.blue()),
            Self::Health => format!("[{}]", label.yellow()),
            Self::Symptoms => format!("[{}]", label.red()),
        }
    }

    /// Format a prompt string with the mode indicator
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::assistant_mode::AssistantMode;
    ///
    /// assert_eq!(AssistantMode::Math.format_prompt(false), "[MATH] >> ");
    /// assert_eq!(AssistantMode::Math.format_prompt(true), "[MATH][...] >> ");
    /// ```
    pub fn format_prompt(&self, busy: bool) -> String {
        if busy {
            format!("[{}][...] >> ", self)
        } else {
            format!("[{}] >> ", self)
        }
    }

    /// Format a prompt string with a colored mode indicator
    pub fn format_colored_prompt(&self, busy: bool) -> String {
        if busy {
            format!("{}[{}] >> ", self.colored_tag(), "...".dimmed())
        } else {
            format!("{} >> ", self.colored_tag())
        }
    }
}

impl std::str::FromStr for AssistantMode {
    type Err = crate::error::EdcareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s).map_err(|_| crate::error::EdcareError::InvalidValue {
            kind: "mode",
            value: s.to_string(),
        })
    }
}
