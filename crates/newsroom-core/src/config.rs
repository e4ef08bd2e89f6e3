//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/newsroom/config.toml)
//! 3. Environment variables (NEWSROOM_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::markdown::RenderPolicy;

/// Environment variable prefix
const ENV_PREFIX: &str = "NEWSROOM";

/// Recipient used for the subscription link when none is configured
pub const DEFAULT_SUBSCRIBE_EMAIL: &str = "editor@example.com";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the article and newsletter files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Render article markdown without escaping raw HTML first
    #[serde(default)]
    pub trust_content: bool,

    /// Recipient of subscription requests
    #[serde(default = "default_subscribe_email")]
    pub subscribe_email: String,

    /// Log file for the TUI (defaults to `<data_dir>/debug.log`)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trust_content: false,
            subscribe_email: default_subscribe_email(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (NEWSROOM_DATA_DIR, NEWSROOM_TRUST_CONTENT,
    ///    NEWSROOM_SUBSCRIBE_EMAIL)
    /// 2. Config file (~/.config/newsroom/config.toml or NEWSROOM_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_TRUST_CONTENT", ENV_PREFIX)) {
            self.trust_content = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // Empty value keeps the current address
        if let Ok(val) = std::env::var(format!("{}_SUBSCRIBE_EMAIL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.subscribe_email = val;
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with NEWSROOM_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newsroom")
            .join("config.toml")
    }

    /// How article bodies are rendered
    pub fn render_policy(&self) -> RenderPolicy {
        RenderPolicy::from_trust(self.trust_content)
    }

    /// Log file for the TUI
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsroom")
}

fn default_subscribe_email() -> String {
    DEFAULT_SUBSCRIBE_EMAIL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "NEWSROOM_DATA_DIR",
        "NEWSROOM_TRUST_CONTENT",
        "NEWSROOM_SUBSCRIBE_EMAIL",
        "NEWSROOM_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.trust_content);
        assert_eq!(config.subscribe_email, "editor@example.com");
        assert!(config.log_file.is_none());
        assert!(config.data_dir.ends_with("newsroom"));
        assert_eq!(config.render_policy(), RenderPolicy::Escaped);
    }

    #[test]
    fn test_log_path() {
        let mut config = Config {
            data_dir: PathBuf::from("/data/newsroom"),
            ..Config::default()
        };
        assert_eq!(config.log_path(), PathBuf::from("/data/newsroom/debug.log"));

        config.log_file = Some(PathBuf::from("/tmp/newsroom.log"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/newsroom.log"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("NEWSROOM_DATA_DIR", "/tmp/newsroom-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/newsroom-test"));
    }

    #[test]
    fn test_env_override_trust_content() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("NEWSROOM_TRUST_CONTENT", "TRUE");
        config.apply_env_overrides();
        assert!(config.trust_content);
        assert_eq!(config.render_policy(), RenderPolicy::Trusted);

        env::set_var("NEWSROOM_TRUST_CONTENT", "0");
        config.apply_env_overrides();
        assert!(!config.trust_content);
    }

    #[test]
    fn test_env_override_subscribe_email() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("NEWSROOM_SUBSCRIBE_EMAIL", "desk@school.edu");
        config.apply_env_overrides();
        assert_eq!(config.subscribe_email, "desk@school.edu");

        env::set_var("NEWSROOM_SUBSCRIBE_EMAIL", "");
        config.apply_env_overrides();
        assert_eq!(config.subscribe_email, "desk@school.edu");
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            trust_content = true
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert!(config.trust_content);
        assert_eq!(config.subscribe_email, DEFAULT_SUBSCRIBE_EMAIL);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        env::set_var("NEWSROOM_DATA_DIR", &data_dir);

        let config = Config::load_from_path(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.data_dir, data_dir);
        assert!(!config.trust_content);
        // Data directory is created on load
        assert!(data_dir.is_dir());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            trust_content: true,
            subscribe_email: "news@school.edu".to_string(),
            log_file: Some(temp_dir.path().join("tui.log")),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert!(loaded.trust_content);
        assert_eq!(loaded.subscribe_email, "news@school.edu");
        assert_eq!(loaded.log_file, config.log_file);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "trust_content = \"maybe\"").unwrap();

        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_config_file_path_env_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("NEWSROOM_CONFIG", "/etc/newsroom.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/etc/newsroom.toml")
        );
    }
}
