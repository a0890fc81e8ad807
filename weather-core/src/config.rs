use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Credentials and endpoint for the OpenWeather service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Optional endpoint override, e.g. a local mock server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub openweather: Option<ProviderConfig>,
}

impl Config {
    /// API key from the environment if set, else from the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        pick_api_key(std::env::var(API_KEY_ENV).ok(), self.stored_api_key())
    }

    pub fn stored_api_key(&self) -> Option<&str> {
        self.openweather.as_ref().map(|cfg| cfg.api_key.as_str())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.openweather.as_ref().and_then(|cfg| cfg.base_url.as_deref())
    }

    /// Set/replace the API key, keeping any configured base URL.
    pub fn set_api_key(&mut self, api_key: String) {
        match self.openweather.as_mut() {
            Some(cfg) => cfg.api_key = api_key,
            None => {
                self.openweather = Some(ProviderConfig {
                    api_key,
                    base_url: None,
                })
            }
        }
    }

    /// Has no effect until an API key is set.
    pub fn set_base_url(&mut self, base_url: Option<String>) {
        if let Some(cfg) = self.openweather.as_mut() {
            cfg.base_url = base_url.filter(|u| !u.trim().is_empty());
        }
    }

    pub fn is_configured(&self) -> bool {
        self.resolve_api_key().is_some()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

pub(crate) fn pick_api_key(from_env: Option<String>, stored: Option<&str>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or_else(|| stored.map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_stored_key() {
        let cfg = Config::default();
        assert_eq!(cfg.stored_api_key(), None);
        assert_eq!(cfg.base_url(), None);
    }

    #[test]
    fn set_api_key_keeps_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("OLD".into());
        cfg.set_base_url(Some("http://localhost:1234".into()));
        cfg.set_api_key("NEW".into());

        assert_eq!(cfg.stored_api_key(), Some("NEW"));
        assert_eq!(cfg.base_url(), Some("http://localhost:1234"));
    }

    #[test]
    fn blank_base_url_clears_override() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_base_url(Some("http://localhost:1234".into()));
        cfg.set_base_url(Some("   ".into()));

        assert_eq!(cfg.base_url(), None);
    }

    #[test]
    fn env_key_overrides_stored_key() {
        assert_eq!(
            pick_api_key(Some("ENV".into()), Some("FILE")),
            Some("ENV".to_string())
        );
        assert_eq!(pick_api_key(Some(" ".into()), Some("FILE")), Some("FILE".to_string()));
        assert_eq!(pick_api_key(None, Some("FILE")), Some("FILE".to_string()));
        assert_eq!(pick_api_key(None, None), None);
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let text = cfg.to_toml().expect("serialize");
        assert!(text.contains("[openweather]"));
        assert!(!text.contains("base_url"));

        let parsed = Config::from_toml(&text).expect("parse");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn parses_hand_written_file() {
        let cfg = Config::from_toml(
            r#"
            [openweather]
            api_key = "abc"
            base_url = "http://127.0.0.1:8080"
            "#,
        )
        .expect("parse");

        assert_eq!(cfg.stored_api_key(), Some("abc"));
        assert_eq!(cfg.base_url(), Some("http://127.0.0.1:8080"));
    }

    #[test]
    fn empty_file_is_unconfigured() {
        let cfg = Config::from_toml("").expect("parse");
        assert_eq!(cfg, Config::default());
    }
}
