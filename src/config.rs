//! Loading backend configuration (file locations, script endpoint, port) from TOML.
//!
//! Every key is optional; see `AppConfig::default` for the fallbacks.
//! `PORT` and `SCRIPT_URL` environment variables override the file.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
  /// JSON document holding all saved templates.
  pub templates_path: PathBuf,
  /// Plain-text log of generated form links.
  pub history_path: PathBuf,
  /// Default form-creation script URL; a client may supply its own per request.
  pub script_url: String,
  pub submit_timeout_secs: u64,
  pub port: u16,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      templates_path: "templates.json".into(),
      history_path: "form_history.txt".into(),
      script_url: String::new(),
      submit_timeout_secs: 30,
      port: 3000,
    }
  }
}

impl AppConfig {
  pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }

  fn apply_env(mut self) -> Self {
    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
      self.port = port;
    }
    if let Ok(url) = std::env::var("SCRIPT_URL") {
      self.script_url = url;
    }
    self
  }
}

/// Load `AppConfig` from FORM_BUILDER_CONFIG, then apply env overrides.
/// A missing variable or an unreadable/invalid file falls back to defaults.
pub fn load_app_config_from_env() -> AppConfig {
  let base = match std::env::var("FORM_BUILDER_CONFIG") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match AppConfig::from_toml(&s) {
        Ok(cfg) => {
          info!(target: "form_builder", %path, "Loaded config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "form_builder", %path, error = %e, "Failed to parse TOML config; using defaults");
          AppConfig::default()
        }
      },
      Err(e) => {
        error!(target: "form_builder", %path, error = %e, "Failed to read TOML config file; using defaults");
        AppConfig::default()
      }
    },
    Err(_) => AppConfig::default(),
  };
  base.apply_env()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_toml_keeps_defaults() {
    let cfg = AppConfig::from_toml(
      r#"
        templates_path = "/var/lib/forms/templates.json"
        submit_timeout_secs = 5
      "#,
    )
    .unwrap();
    assert_eq!(cfg.templates_path, PathBuf::from("/var/lib/forms/templates.json"));
    assert_eq!(cfg.submit_timeout_secs, 5);
    assert_eq!(cfg.history_path, PathBuf::from("form_history.txt"));
    assert_eq!(cfg.port, 3000);
    assert!(cfg.script_url.is_empty());
  }

  #[test]
  fn test_empty_toml_is_default() {
    assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
  }

  #[test]
  fn test_bad_toml_is_error() {
    assert!(AppConfig::from_toml("port = \"many\"").is_err());
  }
}
