use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Configuration with every simulated delay disabled and a fixed seed
#[allow(dead_code)]
pub const FAST_CONFIG: &str = r#"
session:
  reply_delay_ms: 0
  typing_interval_ms: 0
  seed: 1
tools:
  reply_delay_ms: 0
emotion:
  processing_delay_ms: 0
  min_confidence: 75
  max_confidence: 90
"#;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
