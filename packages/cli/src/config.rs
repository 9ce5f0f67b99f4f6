use funnel_editor::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "funnel.config.json";

/// Funnel builder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Document file, relative to the working directory
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Maximum undo levels (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Quiescence window before edits are saved
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,

    /// Session name, seeds generated ids
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

fn default_data_path() -> String {
    "funnels.json".to_string()
}

fn default_save_debounce_ms() -> u64 {
    1000
}

fn default_session_name() -> String {
    "builder".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the document file
    pub fn get_data_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.data_path)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            name: self.session_name.clone(),
            history_limit: self.history_limit,
            save_debounce: Duration::from_millis(self.save_debounce_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            history_limit: 0,
            save_debounce_ms: default_save_debounce_ms(),
            session_name: default_session_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataPath": "data/site.json",
            "historyLimit": 50,
            "saveDebounceMs": 250
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_path, "data/site.json");
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.session_name, "builder");

        let options = config.session_options();
        assert_eq!(options.save_debounce, Duration::from_millis(250));
        assert_eq!(options.history_limit, 50);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_path, "funnels.json");
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.save_debounce_ms, 1000);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
