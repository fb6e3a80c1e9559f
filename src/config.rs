use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `LAYER_TOUR__UI__TICK_RATE_MS=100`.
pub const ENV_PREFIX: &str = "LAYER_TOUR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds (default: 250)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the row of step selector buttons
    #[serde(default = "default_true")]
    pub show_step_bar: bool,
    /// Show key hints in the footer
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

fn default_tick_rate() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_step_bar: true,
            show_key_hints: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_true")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathsConfig {
    /// Log directory; empty means the platform cache directory
    #[serde(default)]
    pub logs: String,
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::user_config_path(), config_path)
    }

    fn load_from(user_config: Option<PathBuf>, config_path: Option<&str>) -> Result<Self> {
        // Embedded defaults so the tour runs without any config file
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = user_config {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// `~/.config/layer-tour/config.toml` (platform equivalent)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("layer-tour").join("config.toml"))
    }

    /// Directory for TUI session logs
    pub fn logs_path(&self) -> PathBuf {
        if !self.paths.logs.is_empty() {
            return PathBuf::from(&self.paths.logs);
        }
        dirs::cache_dir()
            .map(|dir| dir.join("layer-tour").join("logs"))
            .unwrap_or_else(|| PathBuf::from(".layer-tour").join("logs"))
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert!(config.ui.show_step_bar);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = Config::load_from(None, None).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert!(config.ui.show_step_bar);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tour.toml");
        std::fs::write(
            &path,
            "[ui]\ntick_rate_ms = 50\nshow_step_bar = false\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(None, Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert!(!config.ui.show_step_bar);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_user_config_is_layered_under_explicit() {
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("user.toml");
        std::fs::write(&user, "[ui]\ntick_rate_ms = 75\nshow_key_hints = false\n").unwrap();
        let explicit = temp_dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[ui]\ntick_rate_ms = 20\n").unwrap();

        let config = Config::load_from(Some(user), Some(explicit.to_str().unwrap())).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 20);
        assert!(!config.ui.show_key_hints);
    }

    #[test]
    fn test_logs_path_override() {
        let mut config = Config::default();
        config.paths.logs = "/tmp/tour-logs".to_string();
        assert_eq!(config.logs_path(), PathBuf::from("/tmp/tour-logs"));
    }

    #[test]
    fn test_default_logs_path_ends_with_logs() {
        let config = Config::default();
        assert!(config.logs_path().ends_with("logs"));
    }

    #[test]
    fn test_to_toml_contains_sections() {
        let toml_str = Config::default().to_toml().unwrap();
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("tick_rate_ms = 250"));
        assert!(toml_str.contains("[logging]"));
    }
}
