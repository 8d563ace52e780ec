use std::fs;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<String>,
  /// Log level, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// Binary codec used for keys and values
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
  #[default]
  Text,
  Json,
}

/// Client configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// Address of the Redis-compatible server
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  #[serde(default)]
  pub codec: CodecKind,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,
}

fn default_server_addr() -> String {
  "127.0.0.1:6379".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      codec: CodecKind::default(),
      log: LogConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: &str) -> anyhow::Result<Self> {
    let config_str =
      fs::read_to_string(path).with_context(|| format!("Failed to read config file '{}'", path))?;
    Self::parse(&config_str).with_context(|| format!("Failed to parse config file '{}'", path))
  }

  pub fn parse(config_str: &str) -> anyhow::Result<Self> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.server_addr, "127.0.0.1:6379");
    assert_eq!(config.codec, CodecKind::Text);
    assert_eq!(config.log.level, "info");
    assert!(config.log.file.is_none());
  }

  #[test]
  fn test_full_config() {
    let config_str = r#"
server_addr = "10.0.0.5:6380"
codec = "json"

[log]
file = "/tmp/coredb-client.log"
level = "debug"
"#;

    let config = Config::parse(config_str).unwrap();
    assert_eq!(config.server_addr, "10.0.0.5:6380");
    assert_eq!(config.codec, CodecKind::Json);
    assert_eq!(config.log.file.as_deref(), Some("/tmp/coredb-client.log"));
    assert_eq!(config.log.level, "debug");
  }

  #[test]
  fn test_unknown_codec_is_rejected() {
    assert!(Config::parse(r#"codec = "msgpack""#).is_err());
  }

  #[test]
  fn test_missing_file() {
    let err = Config::from_file("/nonexistent/coredb-client.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
  }
}
