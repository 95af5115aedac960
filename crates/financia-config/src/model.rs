use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::{manager::app_data_dir, ConfigError};

/// Environment variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Stores user-configurable preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_storage_slot")]
    pub storage_slot: String,
    #[serde(default = "Config::default_recent_window")]
    pub recent_window: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the transaction slot. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            storage_slot: Self::default_storage_slot(),
            recent_window: Self::default_recent_window(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            ai: AiSettings::default(),
            data_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 11] = [
        "locale",
        "currency",
        "storage_slot",
        "recent_window",
        "ui_color_enabled",
        "data_dir",
        "ai.enabled",
        "ai.model",
        "ai.endpoint",
        "ai.api_key_env",
        "ai.timeout_secs",
    ];

    pub fn default_locale() -> String {
        "pt-BR".into()
    }

    pub fn default_currency() -> String {
        "BRL".into()
    }

    pub fn default_storage_slot() -> String {
        "financia_transactions".into()
    }

    pub fn default_recent_window() -> usize {
        10
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        app_data_dir().join("data")
    }

    /// Current value of `key` rendered as text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "storage_slot" => self.storage_slot.clone(),
            "recent_window" => self.recent_window.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "data_dir" => self.resolve_data_dir().display().to_string(),
            "ai.enabled" => self.ai.enabled.to_string(),
            "ai.model" => self.ai.model.clone(),
            "ai.endpoint" => self.ai.endpoint.clone(),
            "ai.api_key_env" => self.ai.api_key_env.clone(),
            "ai.timeout_secs" => self.ai.timeout_secs.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates `key` from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_uppercase(),
            "storage_slot" => self.storage_slot = non_empty(key, value)?,
            "recent_window" => self.recent_window = parse_number(key, value)?,
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(key, value)?,
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "ai.enabled" => self.ai.enabled = parse_flag(key, value)?,
            "ai.model" => self.ai.model = non_empty(key, value)?,
            "ai.endpoint" => {
                self.ai.endpoint = non_empty(key, value)?.trim_end_matches('/').to_string()
            }
            "ai.api_key_env" => self.ai.api_key_env = non_empty(key, value)?,
            "ai.timeout_secs" => self.ai.timeout_secs = parse_positive(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Settings for the external generative model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default = "AiSettings::default_enabled")]
    pub enabled: bool,
    #[serde(default = "AiSettings::default_model")]
    pub model: String,
    #[serde(default = "AiSettings::default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key. The key itself
    /// is never stored.
    #[serde(default = "AiSettings::default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "AiSettings::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            model: Self::default_model(),
            endpoint: Self::default_endpoint(),
            api_key_env: Self::default_api_key_env(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl AiSettings {
    pub fn default_enabled() -> bool {
        true
    }

    pub fn default_model() -> String {
        "gemini-3-flash-preview".into()
    }

    pub fn default_endpoint() -> String {
        "https://generativelanguage.googleapis.com/v1beta".into()
    }

    pub fn default_api_key_env() -> String {
        "GEMINI_API_KEY".into()
    }

    pub fn default_timeout_secs() -> u64 {
        30
    }

    /// Reads the API key from the configured variable, then from `API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(ConfigError::InvalidValue {
            key: key.into(),
            message: "value must not be empty".into(),
        })
    } else {
        Ok(value.to_string())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.into(),
            message: format!("`{value}` is not a boolean (use on/off)"),
        }),
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match parse_number(key, value)? {
        0 => Err(ConfigError::InvalidValue {
            key: key.into(),
            message: "must be at least 1".into(),
        }),
        seconds => Ok(seconds),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.into(),
        message: format!("`{value}` is not a whole number"),
    })
}
