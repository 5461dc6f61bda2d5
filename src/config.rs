//! Configuration management for EdCare
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::assistant_mode::AssistantMode;
use crate::error::{EdcareError, Result};
use crate::responders::tutor::{AgeGroup, Subject};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for any simulated delay, in milliseconds
const MAX_DELAY_MS: u64 = 60_000;

/// Main configuration structure for EdCare
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat session behavior
    #[serde(default)]
    pub session: SessionConfig,
    /// Settings shared by the single-purpose tools
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Tutor defaults
    #[serde(default)]
    pub tutor: TutorConfig,
    /// Emotion detection settings
    #[serde(default)]
    pub emotion: EmotionConfig,
    /// Logging output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Simulated latency before the chat assistant replies (milliseconds)
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Delay between characters when printing assistant replies (milliseconds).
    /// Zero prints replies at once.
    #[serde(default = "default_typing_interval_ms")]
    pub typing_interval_ms: u64,

    /// Mode a new interactive session starts in
    #[serde(default = "default_mode")]
    pub default_mode: AssistantMode,

    /// Seed for reproducible simulated replies; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_reply_delay_ms() -> u64 {
    1500
}

fn default_typing_interval_ms() -> u64 {
    30
}

fn default_mode() -> AssistantMode {
    AssistantMode::Chat
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            typing_interval_ms: default_typing_interval_ms(),
            default_mode: default_mode(),
            seed: None,
        }
    }
}

/// Tool configuration (math, tutor, guidance, symptoms)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Simulated processing time for tool answers (milliseconds)
    #[serde(default = "default_tool_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_tool_delay_ms() -> u64 {
    2000
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_tool_delay_ms(),
        }
    }
}

/// Tutor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Subject the tutor answers for
    #[serde(default)]
    pub subject: Subject,
    /// Age group the answers are pitched at
    #[serde(default)]
    pub age_group: AgeGroup,
}

/// Emotion detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionConfig {
    /// Simulated analysis time (milliseconds)
    #[serde(default = "default_emotion_delay_ms")]
    pub processing_delay_ms: u64,
    /// Lowest confidence percentage reported
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,
    /// Highest confidence percentage reported
    #[serde(default = "default_max_confidence")]
    pub max_confidence: u8,
}

fn default_emotion_delay_ms() -> u64 {
    1500
}

fn default_min_confidence() -> u8 {
    70
}

fn default_max_confidence() -> u8 {
    99
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_emotion_delay_ms(),
            min_confidence: default_min_confidence(),
            max_confidence: default_max_confidence(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,
    /// Optional file that receives a copy of the log
    #[serde(default)]
    pub file_path: Option<String>,
}

fn default_log_level() -> String {
    "edcare=warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line, for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(EdcareError::from)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Some(value) = env_u64("EDCARE_REPLY_DELAY_MS") {
            self.session.reply_delay_ms = value;
        }

        if let Some(value) = env_u64("EDCARE_TOOL_DELAY_MS") {
            self.tools.reply_delay_ms = value;
        }

        if let Some(value) = env_u64("EDCARE_TYPING_INTERVAL_MS") {
            self.session.typing_interval_ms = value;
        }

        if let Some(value) = env_u64("EDCARE_SEED") {
            self.session.seed = Some(value);
        }

        if let Ok(mode) = std::env::var("EDCARE_DEFAULT_MODE") {
            match AssistantMode::parse_str(&mode) {
                Ok(parsed) => self.session.default_mode = parsed,
                Err(_) => tracing::warn!("Invalid EDCARE_DEFAULT_MODE: {}", mode),
            }
        }

        if let Ok(level) = std::env::var("EDCARE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(json) = std::env::var("EDCARE_LOG_JSON") {
            match json.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.logging.json_format = true,
                "0" | "false" | "no" => self.logging.json_format = false,
                _ => tracing::warn!("Invalid EDCARE_LOG_JSON: {}", json),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            self.logging.level = "edcare=debug".to_string();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any delay is out of range or the confidence
    /// bounds are inverted or above 100
    pub fn validate(&self) -> Result<()> {
        let delays = [
            ("session.reply_delay_ms", self.session.reply_delay_ms),
            ("session.typing_interval_ms", self.session.typing_interval_ms),
            ("tools.reply_delay_ms", self.tools.reply_delay_ms),
            ("emotion.processing_delay_ms", self.emotion.processing_delay_ms),
        ];
        for (name, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(EdcareError::Config(format!(
                    "{} must be less than or equal to {}",
                    name, MAX_DELAY_MS
                ))
                .into());
            }
        }

        if self.emotion.max_confidence > 100 {
            return Err(EdcareError::Config(
                "emotion.max_confidence must be less than or equal to 100".to_string(),
            )
            .into());
        }

        if self.emotion.min_confidence > self.emotion.max_confidence {
            return Err(EdcareError::Config(
                "emotion.min_confidence must not exceed emotion.max_confidence".to_string(),
            )
            .into());
        }

        if self.logging.level.trim().is_empty() {
            return Err(EdcareError::Config("logging.level cannot be empty".to_string()).into());
        }

        Ok(())
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {}: {}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn chat_cli(verbose: bool) -> crate::cli::Cli {
        crate::cli::Cli {
            config: None,
            verbose,
            command: crate::cli::Commands::Chat {
                mode: None,
                subject: None,
                age_group: None,
                seed: None,
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.reply_delay_ms, 1500);
        assert_eq!(config.session.typing_interval_ms, 30);
        assert_eq!(config.session.default_mode, AssistantMode::Chat);
        assert_eq!(config.tools.reply_delay_ms, 2000);
        assert_eq!(config.emotion.min_confidence, 70);
        assert_eq!(config.emotion.max_confidence, 99);
        assert!(config.session.seed.is_none());
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_delay_too_large() {
        let mut config = Config::default();
        config.tools.reply_delay_ms = 60_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_delay_allowed() {
        let mut config = Config::default();
        config.session.reply_delay_ms = 0;
        config.session.typing_interval_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_inverted_confidence() {
        let mut config = Config::default();
        config.emotion.min_confidence = 90;
        config.emotion.max_confidence = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_confidence_above_100() {
        let mut config = Config::default();
        config.emotion.max_confidence = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
session:
  reply_delay_ms: 250
  typing_interval_ms: 0
  default_mode: tutor
  seed: 42
tools:
  reply_delay_ms: 500
tutor:
  subject: science
  age_group: high
emotion:
  processing_delay_ms: 100
logging:
  level: debug
  json_format: true
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.session.reply_delay_ms, 250);
        assert_eq!(config.session.default_mode, AssistantMode::Tutor);
        assert_eq!(config.session.seed, Some(42));
        assert_eq!(config.tools.reply_delay_ms, 500);
        assert_eq!(config.tutor.subject, Subject::Science);
        assert_eq!(config.tutor.age_group, AgeGroup::High);
        assert_eq!(config.emotion.processing_delay_ms, 100);
        assert_eq!(config.emotion.max_confidence, 99);
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_config_from_yaml_rejects_unknown_mode() {
        let yaml = "session:\n  default_mode: cooking\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.session.reply_delay_ms, 1500);
        assert_eq!(config.tutor.subject, Subject::Math);
        assert_eq!(config.tutor.age_group, AgeGroup::Elementary);
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        let config = Config::load("nonexistent.yaml", &chat_cli(false)).unwrap();
        assert_eq!(config.tools.reply_delay_ms, 2000);
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = crate::test_utils::temp_dir();
        let path = crate::test_utils::create_test_file(
            &dir,
            "config.yaml",
            &crate::test_utils::test_config_yaml(),
        );

        let config = Config::load(path.to_str().unwrap(), &chat_cli(false)).unwrap();
        assert_eq!(config.session.reply_delay_ms, 100);
        assert_eq!(config.session.default_mode, AssistantMode::Math);
        assert_eq!(config.tutor.subject, Subject::English);
        assert_eq!(config.emotion.min_confidence, 75);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_malformed_file_is_error() {
        let dir = crate::test_utils::temp_dir();
        let path = crate::test_utils::create_test_file(&dir, "config.yaml", "session: [1, 2");
        crate::test_utils::assert_error_contains(
            Config::load(path.to_str().unwrap(), &chat_cli(false)),
            "YAML",
        );
    }

    #[test]
    #[serial]
    fn test_load_verbose_raises_log_level() {
        let config = Config::load("nonexistent.yaml", &chat_cli(true)).unwrap();
        assert_eq!(config.logging.level, "edcare=debug");
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_overrides_session() {
        std::env::set_var("EDCARE_REPLY_DELAY_MS", "5");
        std::env::set_var("EDCARE_DEFAULT_MODE", "math");
        std::env::set_var("EDCARE_SEED", "7");

        let mut config = Config::default();
        config.apply_env_vars();

        std::env::remove_var("EDCARE_REPLY_DELAY_MS");
        std::env::remove_var("EDCARE_DEFAULT_MODE");
        std::env::remove_var("EDCARE_SEED");

        assert_eq!(config.session.reply_delay_ms, 5);
        assert_eq!(config.session.default_mode, AssistantMode::Math);
        assert_eq!(config.session.seed, Some(7));
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_ignores_invalid_values() {
        std::env::set_var("EDCARE_TOOL_DELAY_MS", "soon");
        std::env::set_var("EDCARE_DEFAULT_MODE", "cooking");

        let mut config = Config::default();
        config.apply_env_vars();

        std::env::remove_var("EDCARE_TOOL_DELAY_MS");
        std::env::remove_var("EDCARE_DEFAULT_MODE");

        assert_eq!(config.tools.reply_delay_ms, 2000);
        assert_eq!(config.session.default_mode, AssistantMode::Chat);
    }
}
