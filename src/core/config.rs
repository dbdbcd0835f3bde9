// src/core/config.rs
use crate::core::constants::{
    DEFAULT_BASE_URL, DEFAULT_GENERIC_FALLBACK, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
    MIN_TIMEOUT_SECS,
};
use crate::core::prelude::*;
use crate::messages::MissingPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

// TOML Configuration Structure
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    general: Option<GeneralConfig>,
    #[serde(default)]
    backend: Option<BackendConfigToml>,
    #[serde(default)]
    storage: Option<StorageConfigToml>,
    #[serde(default)]
    messages: Option<MessagesConfigToml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralConfig {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct BackendConfigToml {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct StorageConfigToml {
    #[serde(default = "default_storage_path")]
    path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct MessagesConfigToml {
    #[serde(default = "default_missing_policy")]
    missing_policy: String,
    #[serde(default = "default_generic_fallback")]
    generic_fallback: String,
}

// Default Functions
fn default_log_level() -> String {
    "info".into()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_storage_path() -> String {
    "messages.json".into()
}
fn default_missing_policy() -> String {
    "auto".into()
}
fn default_generic_fallback() -> String {
    DEFAULT_GENERIC_FALLBACK.into()
}

// Main Configuration Structures
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<String>,
    pub log_level: String,
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub messages: MessagesConfig,
    pub debug_info: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// `None` keeps the cache in memory only.
    pub path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MessagesConfig {
    pub missing_policy: String,
    pub generic_fallback: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Some(default_storage_path()),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            missing_policy: default_missing_policy(),
            generic_fallback: default_generic_fallback(),
        }
    }
}

impl MessagesConfig {
    pub fn policy(&self) -> MissingPolicy {
        match self.missing_policy.trim().to_lowercase().as_str() {
            "diagnostic" => MissingPolicy::Diagnostic,
            "generic" => MissingPolicy::Generic(self.generic_fallback.clone()),
            "silent" => MissingPolicy::Silent,
            "auto" => MissingPolicy::for_build(&self.generic_fallback),
            other => {
                log::warn!("Unknown missing_policy '{}', using auto", other);
                MissingPolicy::for_build(&self.generic_fallback)
            }
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        Self::load_with_messages(true).await
    }

    pub async fn load_with_messages(show_messages: bool) -> Result<Self> {
        // Try existing configs
        for path in crate::setup::setup_toml::get_config_paths() {
            if path.exists() {
                match Self::from_file(&path).await {
                    Ok(config) => {
                        if show_messages {
                            config.log_startup();
                        }
                        return Ok(config);
                    }
                    Err(e) => log::warn!("Skipping config {}: {}", path.display(), e),
                }
            }
        }

        // Create new config
        let path = crate::setup::setup_toml::ensure_config_exists().await?;
        let mut config = Self::from_file(&path).await?;
        config.debug_info = Some(format!("New config: {}", path.display()));

        if show_messages {
            config.log_startup();
        }

        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(AppError::Io)?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|e| AppError::Config(format!("TOML: {}", e)))?;
        let raw_timeout = file
            .backend
            .as_ref()
            .map_or(DEFAULT_TIMEOUT_SECS, |b| b.timeout_secs);

        let mut config = Self::from_file_contents(file)?;
        config.config_path = Some(path.as_ref().to_string_lossy().into_owned());

        // Auto-save corrected values
        if raw_timeout != config.backend.timeout.as_secs() {
            log::warn!(
                "backend.timeout_secs {} out of range, corrected to {}",
                raw_timeout,
                config.backend.timeout.as_secs()
            );
            if let Err(e) = config.save().await {
                log::warn!("Could not save corrected config: {}", e);
            }
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| AppError::Config(format!("TOML: {}", e)))?;
        Self::from_file_contents(file)
    }

    fn from_file_contents(file: ConfigFile) -> Result<Self> {

        let backend = file
            .backend
            .map_or_else(BackendConfig::default, |b| BackendConfig {
                base_url: b.base_url,
                timeout: Duration::from_secs(Self::clamp(
                    b.timeout_secs,
                    MIN_TIMEOUT_SECS,
                    MAX_TIMEOUT_SECS,
                    DEFAULT_TIMEOUT_SECS,
                )),
            });

        if reqwest::Url::parse(&backend.base_url).is_err() {
            return Err(AppError::Config(format!(
                "Invalid backend.base_url: {}",
                backend.base_url
            )));
        }

        let storage = file
            .storage
            .map_or_else(StorageConfig::default, |s| StorageConfig {
                path: if s.path.trim().is_empty() {
                    None
                } else {
                    Some(s.path)
                },
            });

        let messages = file
            .messages
            .map_or_else(MessagesConfig::default, |m| MessagesConfig {
                missing_policy: m.missing_policy,
                generic_fallback: m.generic_fallback,
            });

        Ok(Self {
            config_path: None,
            log_level: file
                .general
                .map_or_else(default_log_level, |g| g.log_level),
            backend,
            storage,
            messages,
            debug_info: None,
        })
    }

    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };

        let file = ConfigFile {
            general: Some(GeneralConfig {
                log_level: self.log_level.clone(),
            }),
            backend: Some(BackendConfigToml {
                base_url: self.backend.base_url.clone(),
                timeout_secs: self.backend.timeout.as_secs(),
            }),
            storage: Some(StorageConfigToml {
                path: self.storage.path.clone().unwrap_or_default(),
            }),
            messages: Some(MessagesConfigToml {
                missing_policy: self.messages.missing_policy.clone(),
                generic_fallback: self.messages.generic_fallback.clone(),
            }),
        };

        let content = toml::to_string_pretty(&file)
            .map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        // Ensure dir exists
        if let Some(parent) = std::path::PathBuf::from(path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(AppError::Io)?;
        }

        tokio::fs::write(path, content).await.map_err(AppError::Io)
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    // Helper methods
    fn clamp(value: u64, min: u64, max: u64, default: u64) -> u64 {
        if value < min || value > max {
            default
        } else {
            value
        }
    }

    pub fn log_startup(&self) {
        log::info!("Msg Cache v{}", crate::core::constants::VERSION);
        log::info!(
            "Backend: {} (timeout {}s), storage: {}",
            self.backend.base_url,
            self.backend.timeout.as_secs(),
            self.storage.path.as_deref().unwrap_or("<memory>")
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            log_level: default_log_level(),
            backend: BackendConfig::default(),
            storage: StorageConfig::default(),
            messages: MessagesConfig::default(),
            debug_info: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.backend.timeout, Duration::from_secs(10));
        assert_eq!(config.storage.path.as_deref(), Some("messages.json"));
    }

    #[test]
    fn timeout_out_of_range_falls_back_to_default() {
        let config = Config::from_toml("[backend]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.backend.timeout, Duration::from_secs(10));

        let config = Config::from_toml("[backend]\ntimeout_secs = 500\n").unwrap();
        assert_eq!(config.backend.timeout, Duration::from_secs(10));

        let config = Config::from_toml("[backend]\ntimeout_secs = 30\n").unwrap();
        assert_eq!(config.backend.timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_storage_path_means_memory() {
        let config = Config::from_toml("[storage]\npath = \"\"\n").unwrap();
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Config::from_toml("[backend]\nbase_url = \"not a url\"\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_policy_is_parsed() {
        let config = Config::from_toml(
            "[messages]\nmissing_policy = \"generic\"\ngeneric_fallback = \"Oops\"\n",
        )
        .unwrap();
        assert_eq!(
            config.messages.policy(),
            MissingPolicy::Generic("Oops".into())
        );

        let config = Config::from_toml("[messages]\nmissing_policy = \"Diagnostic\"\n").unwrap();
        assert_eq!(config.messages.policy(), MissingPolicy::Diagnostic);
    }

    #[tokio::test]
    async fn save_and_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.toml");
        tokio::fs::write(&path, "[backend]\ntimeout_secs = 999\n")
            .await
            .unwrap();

        // Out-of-range value is corrected and written back.
        let config = Config::from_file(&path).await.unwrap();
        assert_eq!(config.backend.timeout, Duration::from_secs(10));

        let reloaded = Config::from_file(&path).await.unwrap();
        assert_eq!(reloaded.backend.timeout, Duration::from_secs(10));
        assert_eq!(reloaded.backend.base_url, DEFAULT_BASE_URL);
    }
}
