//! Application configuration management
//!
//! Handles loading and saving user settings:
//! - Gemini API key (overridable with `GEMINI_API_KEY`)
//! - Message language and commit style
//! - Model, token budget and API endpoint

use std::fmt;
use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;
use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{CommitaiError, Result};

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "COMMITAI_CONFIG";

/// Default Gemini API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Commit message style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommitStyle {
    /// `<type>(<scope>): <description>`
    #[default]
    Conventional,
    /// Free-form subject line
    Simple,
}

impl CommitStyle {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "conventional" => Some(CommitStyle::Conventional),
            "simple" => Some(CommitStyle::Simple),
            _ => None,
        }
    }
}

impl fmt::Display for CommitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitStyle::Conventional => write!(f, "conventional"),
            CommitStyle::Simple => write!(f, "simple"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Stored Gemini API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Language for generated messages (`en`, `pt-br`, ...)
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub commit_style: CommitStyle,

    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Output token budget per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Gemini API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: default_language(),
            commit_style: CommitStyle::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            endpoint: default_endpoint(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            tracing::debug!(path = %config_path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    ///
    /// Only the stored key is written; a key supplied through the
    /// environment never reaches the disk.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;
        restrict_permissions(&config_path)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let project_dirs = ProjectDirs::from("com", "commitai", "commitai")
            .ok_or_else(|| CommitaiError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Effective API key
    ///
    /// Priority: environment variable > config file
    pub fn api_key(&self) -> Option<SecretString> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Some(SecretString::from(key));
            }
        }

        self.api_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.clone()))
    }

    /// Get the API key, returning an error if not configured
    pub fn require_api_key(&self) -> Result<SecretString> {
        self.api_key().ok_or(CommitaiError::ApiKeyMissing)
    }

    /// Whether the effective key comes from the environment
    pub fn api_key_from_env() -> bool {
        std::env::var(API_KEY_ENV).is_ok_and(|key| !key.is_empty())
    }
}

/// Get a masked version of a key for display (shows first 4 and last 4 chars)
pub fn mask_key(key: &SecretString) -> String {
    let exposed = key.expose_secret();
    let len = exposed.chars().count();
    if len <= 8 {
        "*".repeat(len)
    } else {
        let head: String = exposed.chars().take(4).collect();
        let tail: String = exposed.chars().skip(len - 4).collect();
        format!("{}{}{}", head, "*".repeat(len - 8), tail)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.commit_style, CommitStyle::Conventional);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("language = \"pt-br\"\ncommit_style = \"simple\"\n").unwrap();
        assert_eq!(config.language, "pt-br");
        assert_eq!(config.commit_style, CommitStyle::Simple);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_missing_key_not_serialized() {
        let contents = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!contents.contains("api_key"));
        assert!(contents.contains("commit_style = \"conventional\""));
    }

    #[test]
    fn test_commit_style_from_str() {
        assert_eq!(CommitStyle::from_str("Conventional"), Some(CommitStyle::Conventional));
        assert_eq!(CommitStyle::from_str("simple"), Some(CommitStyle::Simple));
        assert_eq!(CommitStyle::from_str("angular"), None);
    }

    #[test]
    fn test_mask_key() {
        let short = SecretString::from("abc");
        assert_eq!(mask_key(&short), "***");

        let long = SecretString::from("AIza1234567890wxyz");
        assert_eq!(mask_key(&long), "AIza**********wxyz");
    }
}
