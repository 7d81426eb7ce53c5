use anyhow::{
  Context,
  anyhow
};
use serde::Deserialize;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StoragePreference {
  /// `localStorage`, falling back to
  /// `sessionStorage`.
  #[default]
  Auto,
  /// Always `sessionStorage`.
  Session
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Trace,
  Debug,
  #[default]
  Info,
  Warn,
  Error
}

impl LogLevel {
  pub fn to_tracing(
    self
  ) -> tracing::Level {
    match self {
      | LogLevel::Trace => {
        tracing::Level::TRACE
      }
      | LogLevel::Debug => {
        tracing::Level::DEBUG
      }
      | LogLevel::Info => {
        tracing::Level::INFO
      }
      | LogLevel::Warn => {
        tracing::Level::WARN
      }
      | LogLevel::Error => {
        tracing::Level::ERROR
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct StorageSection {
  #[serde(default)]
  pub backend: StoragePreference
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct LogSection {
  #[serde(default)]
  pub level: LogLevel
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct Config {
  #[serde(default)]
  pub storage: StorageSection,
  #[serde(default)]
  pub log:     LogSection
}

impl Config {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    if raw.trim().is_empty() {
      return Err(anyhow!(
        "configuration is empty"
      ));
    }
    toml::from_str::<Config>(raw)
      .context(
        "failed to parse ticklist \
         configuration"
      )
  }
}
