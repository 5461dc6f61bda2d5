//! Test utilities for edcare
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, fast configurations and assertion helpers.

use crate::config::Config;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Configuration with every simulated delay set to zero and a fixed seed
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.session.reply_delay_ms = 0;
    config.session.typing_interval_ms = 0;
    config.session.seed = Some(7);
    config.tools.reply_delay_ms = 0;
    config.emotion.processing_delay_ms = 0;
    config
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
session:
  reply_delay_ms: 100
  typing_interval_ms: 0
  default_mode: math
  seed: 1
tools:
  reply_delay_ms: 200
tutor:
  subject: english
  age_group: middle
emotion:
  processing_delay_ms: 0
  min_confidence: 75
  max_confidence: 90
logging:
  level: edcare=info
  json_format: true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant_mode::AssistantMode;
    use crate::error::EdcareError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> =
            Err(EdcareError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_fast_config_is_valid() {
        let config = fast_config();
        assert!(config.validate().is_ok());
        assert_eq!(
            AssistantMode::Math.reply_delay(&config),
            std::time::Duration::ZERO
        );
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.default_mode, AssistantMode::Math);
        assert!(config.logging.json_format);
    }
}
